//! The per-test evaluation protocol.
//!
//! One evaluation is a small state machine:
//!
//! ```text
//! START -> FEATURE_CHECK -> UNSUPPORTED
//!                        -> COMPILE -> FAIL
//!                                   -> EXECUTE -> FAIL
//!                                              -> PASS
//! ```
//!
//! with an implicit retry loop around the compile/execute portion for the
//! transient text-file-busy launch condition. Each evaluation is independent,
//! blocking, and leaves nothing behind: the temporary executable is removed
//! on every exit path, including infrastructure errors.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::annotations::TestAnnotations;
use crate::config::RunConfig;
use crate::errors::HarnessError;
use crate::exec::{self, LaunchFailure};
use crate::outcome::{Evaluation, Outcome};

/// Delay between attempts when a launch hits ETXTBSY.
const BUSY_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Evaluates one test source against one run configuration.
///
/// UNSUPPORTED and FAIL are ordinary outcomes; `Err` means the harness
/// itself could not run the test (an infrastructure error the driver should
/// record separately).
pub fn evaluate(test: &Path, config: &RunConfig) -> Result<Evaluation, HarnessError> {
    let source = fs::read_to_string(test).map_err(|source| HarnessError::SourceRead {
        path: test.to_path_buf(),
        source,
    })?;
    let annotations = TestAnnotations::scan(&source);

    // Feature gating short-circuits before any subprocess runs.
    if let Some(report) = feature_gate(&annotations, config) {
        return Ok(Evaluation {
            outcome: Outcome::Unsupported { report },
            xfail: annotations.xfail,
        });
    }

    // A text-file-busy launch failure restarts the whole compile/execute
    // sequence after a short delay, indefinitely, until it either gets past
    // that point or fails differently.
    let outcome = loop {
        match compile_and_run(test, config) {
            Ok(outcome) => break outcome,
            Err(LaunchFailure::Busy) => thread::sleep(BUSY_RETRY_DELAY),
            Err(LaunchFailure::Fatal(err)) => return Err(err),
        }
    };

    Ok(Evaluation {
        outcome,
        xfail: annotations.xfail,
    })
}

/// Checks declared features against the run's available set. Missing
/// requirements are reported before present disqualifiers.
fn feature_gate(annotations: &TestAnnotations, config: &RunConfig) -> Option<String> {
    let missing: Vec<&str> = annotations
        .requires
        .iter()
        .filter(|tag| !config.available_features.contains(tag.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Some(format!("missing required features: {}", missing.join(", ")));
    }

    let offending: Vec<&str> = annotations
        .unsupported
        .iter()
        .filter(|tag| config.available_features.contains(tag.as_str()))
        .map(String::as_str)
        .collect();
    if !offending.is_empty() {
        return Some(format!(
            "unsupported with these features present: {}",
            offending.join(", ")
        ));
    }

    None
}

/// One compile/execute attempt. The temporary executable is owned by a
/// guard whose drop removes it on every exit path; removal failures are
/// ignored.
fn compile_and_run(test: &Path, config: &RunConfig) -> Result<Outcome, LaunchFailure> {
    let exe = tempfile::Builder::new()
        .prefix("abitest-")
        .suffix(std::env::consts::EXE_SUFFIX)
        .tempfile()
        .map_err(|source| HarnessError::TempExe { source })?
        .into_temp_path();

    let compile = exec::run_captured(&compile_argv(test, &exe, config), None)?;
    if !compile.success() {
        return Ok(Outcome::Fail {
            report: compile.render("compile"),
        });
    }

    let run = exec::run_captured(&run_argv(&exe, config), run_cwd(test))?;
    if !run.success() {
        // The run report carries both command lines so the failure can be
        // reproduced by hand from the report text alone.
        return Ok(Outcome::Fail {
            report: format!("compile command: {}\n{}", compile.cmdline, run.render("run")),
        });
    }

    Ok(Outcome::Pass)
}

/// `<cxx> -o <exe> <source> <compile_flags...> <link_flags...>`, in that
/// fixed order.
fn compile_argv(test: &Path, exe: &Path, config: &RunConfig) -> Vec<String> {
    let mut argv = vec![
        config.cxx.display().to_string(),
        "-o".to_string(),
        exe.display().to_string(),
        test.display().to_string(),
    ];
    argv.extend(config.compile_flags.iter().cloned());
    argv.extend(config.link_flags.iter().cloned());
    argv
}

/// The run command: an `env` prefix when extra variables are configured,
/// the memory-checker wrapper when requested, then the executable.
fn run_argv(exe: &Path, config: &RunConfig) -> Vec<String> {
    let mut argv = Vec::new();
    if !config.exec_env.is_empty() {
        argv.push("env".to_string());
        argv.extend(config.exec_env.iter().map(|(key, value)| format!("{key}={value}")));
    }
    if let Some(wrapper) = &config.memcheck {
        let mut wrapped = wrapper.clone();
        wrapped.append(&mut argv);
        argv = wrapped;
    }
    argv.push(exe.display().to_string());
    argv
}

/// Tests run from their containing directory.
fn run_cwd(test: &Path) -> Option<&Path> {
    test.parent().filter(|dir| !dir.as_os_str().is_empty())
}
