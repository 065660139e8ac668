//! Shared fixtures: a scripted stand-in for the C++ compiler so the
//! evaluation pipeline can be exercised without a real toolchain.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Writes a fake compiler that honors the harness invocation shape
/// `fake-cc -o OUT SRC [flags...]`: it strips the `//` comment header from
/// SRC, installs the rest as an executable script at OUT, and appends OUT to
/// `compiled.log` next to itself.
pub fn write_fake_compiler(dir: &Path) -> PathBuf {
    let path = dir.join("fake-cc");
    let script = "#!/bin/sh\n\
                  grep -v '^//' \"$3\" > \"$2\"\n\
                  chmod +x \"$2\"\n\
                  echo \"$2\" >> \"$(dirname \"$0\")/compiled.log\"\n\
                  exit 0\n";
    fs::write(&path, script).unwrap();
    make_executable(&path);
    path
}

/// Writes a compiler that always fails, with output on both streams.
pub fn write_failing_compiler(dir: &Path) -> PathBuf {
    let path = dir.join("fake-cc-fail");
    let script = "#!/bin/sh\n\
                  echo 'note: frontend gave up'\n\
                  echo 'fake-cc: catastrophic error' >&2\n\
                  exit 1\n";
    fs::write(&path, script).unwrap();
    make_executable(&path);
    path
}

/// Writes a test source whose `//` header carries annotations and whose body
/// is the shell script the fake compiler will install as the test binary.
pub fn write_test_source(dir: &Path, name: &str, header: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{header}{body}")).unwrap();
    path
}

/// A body that simply exits with the given code.
pub fn exiting_body(code: i32) -> String {
    format!("#!/bin/sh\nexit {code}\n")
}

/// Paths recorded by the fake compiler, one per compile.
pub fn compiled_paths(dir: &Path) -> Vec<PathBuf> {
    match fs::read_to_string(dir.join("compiled.log")) {
        Ok(log) => log.lines().map(PathBuf::from).collect(),
        Err(_) => Vec::new(),
    }
}

fn make_executable(path: &Path) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}
