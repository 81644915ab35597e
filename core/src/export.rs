//! Plain-text persistence of a finished sweep.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lanscan_common::error::ScanError;
use lanscan_common::network::host::HostRecord;

use crate::scanner::ScanReport;

pub const TABLE_WIDTH: usize = 60;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Column titles, padded to the same widths as [`format_row`].
pub fn table_header() -> String {
    format!("{:<15} {:<25} {:<10}", "IP Address", "Hostname", "Latency")
}

/// One fixed-width line: address, hostname and latency in milliseconds.
pub fn format_row(record: &HostRecord) -> String {
    format!(
        "{:<15} {:<25} {:.1}ms",
        record.addr.to_string(),
        record.hostname,
        record.latency_ms
    )
}

pub fn render_report(report: &ScanReport, timestamp: DateTime<Local>) -> String {
    let separator = "-".repeat(TABLE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("LAN scan results - {}\n", timestamp.format(TIMESTAMP_FORMAT)));
    out.push_str(&format!("Network: {}\n", report.network));
    out.push_str(&format!("Alive hosts: {}\n", report.alive_count()));
    if report.interrupted {
        out.push_str(&format!(
            "Interrupted after {}/{} probes\n",
            report.completed, report.total
        ));
    }
    out.push_str(&separator);
    out.push('\n');
    out.push_str(table_header().trim_end());
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for record in &report.records {
        out.push_str(&format_row(record));
        out.push('\n');
    }
    out
}

/// `scan_results_<YYYYmmdd_HHMMSS>.txt` for the given moment.
pub fn timestamped_output_path(at: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("scan_results_{}.txt", at.format(FILE_STAMP_FORMAT)))
}

/// Output file of a quick scan started now.
pub fn quick_output_path() -> PathBuf {
    timestamped_output_path(Local::now())
}

/// Writes the report to `path`, replacing any existing file.
pub fn save_report(report: &ScanReport, path: &Path) -> Result<(), ScanError> {
    let body = render_report(report, Local::now());
    fs::write(path, body).map_err(|source| ScanError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
