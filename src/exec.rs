//! Captured subprocess invocation.
//!
//! Every subprocess the harness runs is captured in full: the shell-quoted
//! command line, the exit status, and both output streams. Failure reports
//! built from a [`ProcOutput`] are self-contained and reproducible by hand.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::errors::HarnessError;

/// The captured result of one completed subprocess.
#[derive(Debug, Clone)]
pub struct ProcOutput {
    /// The full command line, shell-quoted for display.
    pub cmdline: String,
    /// Exit code, or `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Renders a failure report fragment: the quoted command, the exit
    /// status, then each captured stream when non-empty.
    pub fn render(&self, label: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{label} command: {}", self.cmdline);
        match self.status {
            Some(code) => {
                let _ = writeln!(out, "{label} exit code: {code}");
            }
            None => {
                let _ = writeln!(out, "{label} terminated by signal");
            }
        }
        if !self.stdout.is_empty() {
            let _ = writeln!(out, "{label} stdout:\n{}", self.stdout.trim_end());
        }
        if !self.stderr.is_empty() {
            let _ = writeln!(out, "{label} stderr:\n{}", self.stderr.trim_end());
        }
        out
    }
}

/// Why a subprocess could not be launched.
#[derive(Debug)]
pub enum LaunchFailure {
    /// The executable was still open for writing (ETXTBSY); transient,
    /// recovered by retrying.
    Busy,
    /// Any other launch error; fatal for this test.
    Fatal(HarnessError),
}

impl From<HarnessError> for LaunchFailure {
    fn from(err: HarnessError) -> Self {
        LaunchFailure::Fatal(err)
    }
}

/// Runs `argv` to completion, capturing output. A non-zero exit is not an
/// error here; only a failure to launch the process at all is.
pub fn run_captured(argv: &[String], cwd: Option<&Path>) -> Result<ProcOutput, LaunchFailure> {
    let cmdline = shell_join(argv);
    let Some((prog, args)) = argv.split_first() else {
        return Err(LaunchFailure::Fatal(HarnessError::Spawn {
            cmdline,
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
        }));
    };

    let mut cmd = Command::new(prog);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    match cmd.output() {
        Ok(output) => Ok(ProcOutput {
            cmdline,
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
        Err(err) if is_text_file_busy(&err) => Err(LaunchFailure::Busy),
        Err(err) => Err(LaunchFailure::Fatal(HarnessError::Spawn {
            cmdline,
            source: err,
        })),
    }
}

/// ETXTBSY: the binary is still open for writing in another process.
fn is_text_file_busy(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::ExecutableFileBusy || err.raw_os_error() == Some(26)
}

/// Quotes one argument for POSIX shell display.
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    let safe = |b: u8| {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'/' | b'=' | b'+' | b':' | b',' | b'@')
    };
    if !arg.is_empty() && arg.bytes().all(safe) {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Renders a full argv as a copy-pasteable shell command line.
pub fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_arguments_stay_unquoted() {
        assert_eq!(shell_quote("a.out"), "a.out");
        assert_eq!(shell_quote("/usr/bin/c++"), "/usr/bin/c++");
        assert_eq!(shell_quote("-DNDEBUG=1"), "-DNDEBUG=1");
    }

    #[test]
    fn special_characters_are_single_quoted() {
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn join_quotes_per_argument() {
        let argv = vec!["c++".to_string(), "-o".to_string(), "out dir/a".to_string()];
        assert_eq!(shell_join(&argv), "c++ -o 'out dir/a'");
    }

    #[test]
    fn render_includes_streams_only_when_present() {
        let proc = ProcOutput {
            cmdline: "c++ -o a t.cpp".to_string(),
            status: Some(1),
            stdout: String::new(),
            stderr: "t.cpp:1: error\n".to_string(),
        };
        let report = proc.render("compile");
        assert!(report.contains("compile command: c++ -o a t.cpp"));
        assert!(report.contains("compile exit code: 1"));
        assert!(report.contains("compile stderr:\nt.cpp:1: error"));
        assert!(!report.contains("stdout"));
    }

    #[test]
    fn empty_argv_is_a_fatal_launch_failure() {
        match run_captured(&[], None) {
            Err(LaunchFailure::Fatal(HarnessError::Spawn { .. })) => {}
            other => panic!("expected fatal spawn failure, got {other:?}"),
        }
    }
}
