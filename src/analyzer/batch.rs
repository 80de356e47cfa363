//! Newline-delimited batch analysis.

use super::parse_and_classify;
use crate::error::ParseError;
use crate::models::SubnetDescriptor;

/// A batch line that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    /// 1-based line number in the batch text.
    pub line_number: usize,
    pub error: ParseError,
}

/// Successes and failures of one batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<SubnetDescriptor>,
    pub errors: Vec<BatchError>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.errors.is_empty()
    }
}

/// Analyze every non-blank line independently.
///
/// Text after `#` is a comment. A failing line is recorded and the batch continues.
pub fn analyze_batch(text: &str) -> BatchReport {
    let mut report = BatchReport::default();

    for (i, line) in text.lines().enumerate() {
        let entry = line.split('#').next().unwrap_or_default().trim();
        if entry.is_empty() {
            continue;
        }
        match parse_and_classify(entry) {
            Ok(descriptor) => report.results.push(descriptor),
            Err(error) => {
                log::warn!("line {}: {}", i + 1, error);
                report.errors.push(BatchError {
                    line_number: i + 1,
                    error,
                });
            }
        }
    }

    log::info!(
        "# Batch done: {} ok, {} failed",
        report.results.len(),
        report.errors.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_batch_valid_and_invalid() {
        let report = analyze_batch("192.168.1.0/24\n300.1.1.1/24\n");
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.results[0].input_text, "192.168.1.0/24");
        assert_eq!(report.errors[0].line_number, 2);
        assert_eq!(
            report.errors[0].error.reason,
            ParseErrorKind::OctetOutOfRange("300".to_string())
        );
    }

    #[test]
    fn test_batch_error_does_not_block_later_lines() {
        let report = analyze_batch("bogus\n10.0.0.0/8\n\n   \n2001:db8::/32\nalso/bad\n172.16.0.0/12");
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.errors.len(), 2);
        let lines: Vec<usize> = report.errors.iter().map(|e| e.line_number).collect();
        assert_eq!(lines, vec![1, 6]);
    }

    #[test]
    fn test_batch_comments_and_blanks() {
        let report = analyze_batch("# office\n10.1.0.0/16  # lan\n\n");
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].input_text, "10.1.0.0/16");
        assert!(report.errors.is_empty());
        assert!(analyze_batch("\n\n# nothing").is_empty());
    }
}
