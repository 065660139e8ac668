//! Infrastructure errors for the harness.
//!
//! Test failures are never errors: a test that compiles badly or exits
//! non-zero produces an [`Outcome`](crate::Outcome), not a `HarnessError`.
//! This type covers only the cases where the harness itself could not do its
//! job, so the driver can record them separately from test failures.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Fatal infrastructure failures, distinct from test outcomes.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("failed to read test source `{}`", path.display())]
    #[diagnostic(code(abitest::source_read))]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to allocate a temporary executable")]
    #[diagnostic(
        code(abitest::temp_exe),
        help("check that the system temporary directory exists and is writable")
    )]
    TempExe {
        #[source]
        source: io::Error,
    },

    #[error("failed to launch subprocess: {cmdline}")]
    #[diagnostic(
        code(abitest::spawn),
        help("the command could not be started at all; check the compiler path and wrapper arguments")
    )]
    Spawn {
        cmdline: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read run profile `{}`", path.display())]
    #[diagnostic(code(abitest::profile_read))]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse run profile `{}`", path.display())]
    #[diagnostic(code(abitest::profile_parse))]
    ProfileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
