//! Terminal output.
//!
//! Labeled blocks for single results, batch reports, history tables and suggestions.

use crate::analyzer::BatchReport;
use crate::models::{HistoryRecord, SubnetDescriptor};
use crate::suggest::Suggestion;
use chrono_tz::Tz;
use colored::Colorize;
use itertools::Itertools;
use std::fmt::Write;

const NOT_APPLICABLE: &str = "N/A";

/// Separator between blocks in batch output.
pub const BLOCK_DELIMITER: &str = "---";

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub(crate) fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

fn label_line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let label = format!("{:<18}", format!("{label}:"));
    // writing to a String cannot fail
    let _ = writeln!(out, "{} {value}", label.bold());
}

/// All fields of one descriptor, one `Label: value` line each.
pub fn render_descriptor(d: &SubnetDescriptor) -> String {
    let mut out = String::new();
    label_line(&mut out, "IP Input", &d.input_text);
    label_line(&mut out, "IP Version", d.ip_version);
    label_line(&mut out, "Network Address", d.network_address);
    label_line(&mut out, "Broadcast Address", or_na(d.broadcast_address));
    label_line(&mut out, "Subnet Mask", d.netmask);
    label_line(&mut out, "Wildcard Mask", or_na(d.wildcard_mask));
    label_line(&mut out, "Prefix Length", format!("/{}", d.prefix_length));
    label_line(&mut out, "Total IPs", d.total_addresses);
    label_line(&mut out, "Usable Hosts", d.usable_hosts.count);
    label_line(&mut out, "First Usable IP", d.usable_hosts.first);
    label_line(&mut out, "Last Usable IP", d.usable_hosts.last);
    label_line(&mut out, "Class", d.classification);
    label_line(&mut out, "Is Private", yes_no(d.is_private));
    label_line(&mut out, "Is Multicast", yes_no(d.is_multicast));
    label_line(&mut out, "Is Reserved", yes_no(d.is_reserved));
    out
}

/// Successes as delimited blocks, then every failure with its line number.
pub fn render_batch(report: &BatchReport) -> String {
    let mut out = String::new();
    if !report.results.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            format!("Processed {} IPs:", report.results.len()).green()
        );
        for d in &report.results {
            out.push_str(&render_descriptor(d));
            let _ = writeln!(out, "{BLOCK_DELIMITER}");
        }
    }
    if !report.errors.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            format!("{} line(s) failed:", report.errors.len()).red()
        );
        for e in &report.errors {
            let _ = writeln!(out, "x line {}: {}", e.line_number, e.error);
        }
    }
    out
}

const HISTORY_COLUMNS: [(&str, usize); 8] = [
    ("id", 6),
    ("created_at", 21),
    ("ip_input", 22),
    ("network", 18),
    ("prefix", 8),
    ("usable_hosts", 14),
    ("class", 16),
    ("private", 9),
];

/// History as a quoted, aligned table with timestamps in `tz`.
pub fn render_history(records: &[HistoryRecord], tz: Tz) -> String {
    if records.is_empty() {
        return "No history found yet.\n".to_string();
    }
    let mut out = String::new();
    let header = HISTORY_COLUMNS
        .iter()
        .map(|(name, width)| format_field(name, *width))
        .join(",");
    let _ = writeln!(out, "{header}");

    for r in records {
        let created = r
            .created_at
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let values = [
            r.id.to_string(),
            created,
            r.input_text.clone(),
            r.network_address.to_string(),
            format!("/{}", r.prefix_length),
            r.usable_host_count.to_string(),
            r.classification.to_string(),
            yes_no(r.is_private).to_string(),
        ];
        let row = values
            .iter()
            .zip(HISTORY_COLUMNS.iter())
            .map(|(value, (_, width))| format_field(value, *width))
            .join(",");
        let _ = writeln!(out, "{row}");
    }
    out
}

/// Suggested prefix with the block size it gives.
pub fn render_suggestion(source: &str, s: &Suggestion) -> String {
    format!(
        "{} /{} ({source})\nTotal IPs: {}, Usable Hosts: {}\n",
        "Suggested Prefix Length:".bold(),
        s.prefix_length,
        s.total_addresses,
        s.usable_hosts
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{analyze_batch, parse_and_classify};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_render_descriptor_v4() {
        colored::control::set_override(false);
        let d = parse_and_classify("192.168.1.5/24").unwrap();
        let text = render_descriptor(&d);
        assert!(text.contains("Network Address:   192.168.1.0"), "{text}");
        assert!(text.contains("Broadcast Address: 192.168.1.255"));
        assert!(text.contains("Wildcard Mask:     0.0.0.255"));
        assert!(text.contains("Prefix Length:     /24"));
        assert!(text.contains("Usable Hosts:      254"));
        assert!(text.contains("Class:             Class C"));
        assert!(text.contains("Is Private:        Yes"));
        assert_eq!(text.lines().count(), 15);
    }

    #[test]
    fn test_render_descriptor_v6_not_applicable() {
        colored::control::set_override(false);
        let d = parse_and_classify("2001:db8::/32").unwrap();
        let text = render_descriptor(&d);
        assert!(text.contains("Broadcast Address: N/A"));
        assert!(text.contains("Wildcard Mask:     N/A"));
        assert!(text.contains("Total IPs:         79228162514264337593543950336"));
        assert!(text.contains("Class:             IPv6"));
    }

    #[test]
    fn test_render_batch() {
        colored::control::set_override(false);
        let report = analyze_batch("10.0.0.0/8\n300.1.1.1/24\n10.0.0.0/31");
        let text = render_batch(&report);
        assert!(text.contains("Processed 2 IPs:"));
        assert_eq!(text.matches(BLOCK_DELIMITER).count(), 2);
        assert!(text.contains("1 line(s) failed:"));
        assert!(text.contains("x line 2: Invalid IP/Network '300.1.1.1/24'"));
    }

    #[test]
    fn test_render_history() {
        let d = parse_and_classify("10.0.0.0/8").unwrap();
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let r = HistoryRecord::from_descriptor(7, &d, created);
        let text = render_history(&[r], chrono_tz::Pacific::Auckland);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"created_at\""));
        assert!(lines[1].contains("\"2024-05-02 00:00:00\""));
        assert!(lines[1].contains("\"16777214\""));
        assert!(lines[1].contains("\"Class A\""));
        assert_eq!(render_history(&[], Tz::UTC), "No history found yet.\n");
    }

    #[test]
    fn test_render_suggestion() {
        colored::control::set_override(false);
        let s = Suggestion::for_prefix(26).unwrap();
        let text = render_suggestion("closed form", &s);
        assert!(text.contains("/26 (closed form)"));
        assert!(text.contains("Total IPs: 64, Usable Hosts: 62"));
    }
}
