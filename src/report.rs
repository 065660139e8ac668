//! Terminal reporting for evaluation results.

use crate::outcome::{Evaluation, Outcome};

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Controls color usage for report output.
pub struct ReportStyle {
    pub use_colors: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl ReportStyle {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Prints one line per result plus a summary, and returns
/// `(passed, failed, unsupported)` counts.
pub fn report_results(results: &[(String, Evaluation)], style: &ReportStyle) -> (usize, usize, usize) {
    for (file, evaluation) in results {
        let xfail = xfail_suffix(evaluation);
        match &evaluation.outcome {
            Outcome::Pass => {
                println!("{}: {}{}", style.colorize("PASS", GREEN), file, xfail);
            }
            Outcome::Unsupported { report } => {
                println!(
                    "{}: {}{} ({})",
                    style.colorize("UNSUPPORTED", YELLOW),
                    file,
                    xfail,
                    report
                );
            }
            Outcome::Fail { report } => {
                println!("{}: {}{}", style.colorize("FAIL", RED), file, xfail);
                for line in report.lines() {
                    println!("  {line}");
                }
            }
        }
    }

    let (passed, failed, unsupported) = partition_results(results);
    println!(
        "\nSummary: total {}, {} {}, {} {}, {} {}",
        results.len(),
        style.colorize("passed", GREEN),
        passed,
        style.colorize("failed", RED),
        failed,
        style.colorize("unsupported", YELLOW),
        unsupported,
    );

    if failed > 0 {
        eprintln!("\nFailed tests:");
        for (file, evaluation) in results {
            if evaluation.outcome.is_fail() {
                eprintln!("  - {file}");
            }
        }
    }

    (passed, failed, unsupported)
}

/// Counts results by outcome kind.
pub fn partition_results(results: &[(String, Evaluation)]) -> (usize, usize, usize) {
    let passed = results.iter().filter(|(_, e)| e.outcome.is_pass()).count();
    let failed = results.iter().filter(|(_, e)| e.outcome.is_fail()).count();
    let unsupported = results
        .iter()
        .filter(|(_, e)| e.outcome.is_unsupported())
        .count();
    (passed, failed, unsupported)
}

fn xfail_suffix(evaluation: &Evaluation) -> String {
    if evaluation.xfail.is_empty() {
        String::new()
    } else {
        format!(" [XFAIL: {}]", evaluation.xfail.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(outcome: Outcome) -> Evaluation {
        Evaluation {
            outcome,
            xfail: vec![],
        }
    }

    #[test]
    fn colorize_respects_style() {
        let colored = ReportStyle { use_colors: true };
        let plain = ReportStyle { use_colors: false };
        assert_eq!(colored.colorize("PASS", GREEN), "\x1b[32mPASS\x1b[0m");
        assert_eq!(plain.colorize("PASS", GREEN), "PASS");
    }

    #[test]
    fn partition_counts_each_kind() {
        let results = vec![
            ("a.cpp".to_string(), evaluation(Outcome::Pass)),
            (
                "b.cpp".to_string(),
                evaluation(Outcome::Fail {
                    report: "boom".to_string(),
                }),
            ),
            (
                "c.cpp".to_string(),
                evaluation(Outcome::Unsupported {
                    report: "missing required features: asan".to_string(),
                }),
            ),
            ("d.cpp".to_string(), evaluation(Outcome::Pass)),
        ];
        assert_eq!(partition_results(&results), (2, 1, 1));
    }

    #[test]
    fn xfail_tags_are_surfaced() {
        let evaluation = Evaluation {
            outcome: Outcome::Pass,
            xfail: vec!["clang-legacy-abi".to_string()],
        };
        assert_eq!(xfail_suffix(&evaluation), " [XFAIL: clang-legacy-abi]");
    }
}
