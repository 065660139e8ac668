//! Tri-state evaluation results.

/// The result of evaluating one test against one run configuration.
///
/// `UNSUPPORTED` is deliberately distinct from `FAIL` so aggregate reporting
/// can separate "cannot run here" from "ran and broke".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Compiled and ran with exit code zero.
    Pass,
    /// Compilation or execution exited non-zero; the report is
    /// self-contained (exact argv, exit code, captured streams).
    Fail { report: String },
    /// Feature gating ruled the test out before anything was run.
    Unsupported { report: String },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail { .. } => "FAIL",
            Outcome::Unsupported { .. } => "UNSUPPORTED",
        }
    }

    /// The diagnostic report; empty for a pass.
    pub fn report(&self) -> &str {
        match self {
            Outcome::Pass => "",
            Outcome::Fail { report } | Outcome::Unsupported { report } => report,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Outcome::Unsupported { .. })
    }
}

/// Everything one evaluation hands back to the driver.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Expected-failure tags from the test's annotation block, surfaced for
    /// the driver to interpret; the evaluator itself never acts on them.
    pub xfail: Vec<String>,
}
