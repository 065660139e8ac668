//! Annotation scanning for test sources.
//!
//! Conformance tests declare their requirements in the leading comment block
//! of the source file:
//!
//! ```cpp
//! // REQUIRES: cxx-exceptions, 64-bit
//! // UNSUPPORTED: asan
//! // XFAIL: clang-legacy-abi
//! ```
//!
//! Scanning walks the file line by line and stops permanently at the first
//! line that is neither blank nor a recognized comment. Marker text appearing
//! after that point is never honored.

/// Requirement and expectation tags extracted from a test source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestAnnotations {
    /// Feature tags that must all be available for the test to run.
    pub requires: Vec<String>,
    /// Feature tags whose presence disqualifies the test.
    pub unsupported: Vec<String>,
    /// Expected-failure tags; collected for the driver, never acted on here.
    pub xfail: Vec<String>,
}

/// Scanner position within the leading comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Still inside the leading block; lines are inspected for markers.
    Scanning,
    /// Past the first real content line; all remaining lines are ignored.
    Stopped,
}

impl TestAnnotations {
    /// Scans the leading comment block of `source` for annotation markers.
    ///
    /// Each marker's payload is a comma-separated list; entries are trimmed
    /// and empty entries dropped. A line carries at most one classification,
    /// probed in the order `REQUIRES:`, `UNSUPPORTED:`, `XFAIL:`.
    pub fn scan(source: &str) -> Self {
        let mut annotations = Self::default();
        let mut state = ScanState::Scanning;

        for line in source.lines() {
            state = match state {
                ScanState::Stopped => ScanState::Stopped,
                ScanState::Scanning => {
                    let content = line.trim_start();
                    if content.is_empty() || is_comment(content) {
                        annotations.classify(line);
                        ScanState::Scanning
                    } else {
                        ScanState::Stopped
                    }
                }
            };
        }

        annotations
    }

    /// Returns true when the source declares no annotations at all.
    pub fn is_empty(&self) -> bool {
        self.requires.is_empty() && self.unsupported.is_empty() && self.xfail.is_empty()
    }

    fn classify(&mut self, line: &str) {
        if let Some(tags) = marker_payload(line, "REQUIRES:") {
            self.requires.extend(tags);
        } else if let Some(tags) = marker_payload(line, "UNSUPPORTED:") {
            self.unsupported.extend(tags);
        } else if let Some(tags) = marker_payload(line, "XFAIL:") {
            self.xfail.extend(tags);
        }
    }
}

/// Comment syntaxes recognized in the leading block.
fn is_comment(content: &str) -> bool {
    content.starts_with("//") || content.starts_with("/*")
}

/// Extracts the comma-separated tag list following `marker`, if present.
fn marker_payload(line: &str, marker: &str) -> Option<Vec<String>> {
    let at = line.find(marker)?;
    let payload = &line[at + marker.len()..];
    Some(
        payload
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_three_markers() {
        let src = "// REQUIRES: cxx-exceptions, 64-bit\n\
                   // UNSUPPORTED: asan\n\
                   // XFAIL: clang-legacy-abi\n\
                   int main() {}\n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.requires, vec!["cxx-exceptions", "64-bit"]);
        assert_eq!(a.unsupported, vec!["asan"]);
        assert_eq!(a.xfail, vec!["clang-legacy-abi"]);
    }

    #[test]
    fn stops_at_first_content_line() {
        let src = "// XFAIL: foo\nint main(){}\n// REQUIRES: bar\n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.xfail, vec!["foo"]);
        assert!(a.requires.is_empty());
    }

    #[test]
    fn stopping_line_itself_is_not_inspected() {
        let src = "int x; // REQUIRES: foo\n";
        let a = TestAnnotations::scan(src);
        assert!(a.is_empty());
    }

    #[test]
    fn blank_lines_do_not_end_the_block() {
        let src = "// REQUIRES: a\n\n   \n// UNSUPPORTED: b\nint main(){}\n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.requires, vec!["a"]);
        assert_eq!(a.unsupported, vec!["b"]);
    }

    #[test]
    fn block_comments_count_as_comments() {
        let src = "/* REQUIRES: a */\nint main(){}\n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.requires, vec!["a */"]);
    }

    #[test]
    fn one_classification_per_line() {
        // The first marker wins; the rest of the line is its payload.
        let src = "// REQUIRES: a UNSUPPORTED: b\nint main(){}\n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.requires, vec!["a UNSUPPORTED: b"]);
        assert!(a.unsupported.is_empty());
    }

    #[test]
    fn payload_entries_are_trimmed_and_empties_dropped() {
        let src = "// REQUIRES:  a ,, b  , \n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.requires, vec!["a", "b"]);
    }

    #[test]
    fn repeated_markers_accumulate() {
        let src = "// REQUIRES: a\n// REQUIRES: b\n";
        let a = TestAnnotations::scan(src);
        assert_eq!(a.requires, vec!["a", "b"]);
    }

    #[test]
    fn empty_source_yields_no_annotations() {
        assert!(TestAnnotations::scan("").is_empty());
    }
}
