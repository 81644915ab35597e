use colored::*;
use lanscan_common::network::host::HostRecord;
use lanscan_core::scanner::ScanEvent;

use crate::terminal::colors;

/// Live line for a host that just answered.
pub fn found_line(record: &HostRecord) -> String {
    format!(
        "{} {} - {} ({})",
        "✓".bright_green().bold(),
        record.addr.to_string().color(colors::IPV4_ADDR),
        hostname(record, 0),
        format!("{:.1}ms", record.latency_ms).color(colors::LATENCY)
    )
}

pub fn progress_line(completed: u64, total: u64) -> String {
    let percent = ScanEvent::percent(completed, total);
    format!(
        "Progress: {}/{} ({:.1}%)",
        completed.to_string().color(colors::ACCENT),
        total,
        percent
    )
}

/// Table row with the same column widths as the saved report.
pub fn table_row(record: &HostRecord) -> String {
    format!(
        "{} {} {}",
        format!("{:<15}", record.addr.to_string()).color(colors::IPV4_ADDR),
        hostname(record, 25),
        format!("{:.1}ms", record.latency_ms).color(colors::LATENCY)
    )
}

fn hostname(record: &HostRecord, width: usize) -> ColoredString {
    let padded = format!("{:<width$}", record.hostname);
    if record.has_hostname() {
        padded.color(colors::HOSTNAME)
    } else {
        padded.color(colors::UNKNOWN)
    }
}
