//! CSV export of calculation history.

use super::terminal::{or_na, yes_no};
use crate::models::HistoryRecord;
use itertools::Itertools;
use std::error::Error;
use std::io::Write;

const CSV_HEADER: [&str; 18] = [
    "id",
    "ip_input",
    "ip_version",
    "network_address",
    "broadcast_address",
    "netmask",
    "wildcard_mask",
    "prefixlen",
    "total_ips",
    "usable_hosts",
    "first_usable_ip",
    "last_usable_ip",
    "class",
    "is_private",
    "is_multicast",
    "is_reserved",
    "timestamp",
    "cidr",
];

fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        // If the string contains a comma or double quote, enclose it in double quotes
        // and escape any double quotes within the field.
        // also excel does not like spaces after comma between fields
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}

/// Write a header and one row per record.
pub fn write_history_csv<W: Write>(
    records: &[HistoryRecord],
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    log::info!("#Start write_history_csv() rows={}", records.len());
    writeln!(out, "{}", CSV_HEADER.join(","))?;

    for r in records {
        let fields = [
            r.id.to_string(),
            r.input_text.clone(),
            r.ip_version.to_string(),
            r.network_address.to_string(),
            or_na(r.broadcast_address),
            r.netmask.to_string(),
            or_na(r.wildcard_mask),
            r.prefix_length.to_string(),
            r.total_addresses.to_string(),
            r.usable_host_count.to_string(),
            r.first_usable_address.to_string(),
            r.last_usable_address.to_string(),
            r.classification.to_string(),
            yes_no(r.is_private).to_string(),
            yes_no(r.is_multicast).to_string(),
            yes_no(r.is_reserved).to_string(),
            r.created_at.to_rfc3339(),
            format!("{}/{}", r.network_address, r.prefix_length),
        ];
        let row = fields.iter().map(|f| escape_csv_field(f)).join(",");
        writeln!(out, "{row}")?;
    }
    Ok(())
}
