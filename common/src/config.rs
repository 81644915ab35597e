use std::path::PathBuf;
use std::time::Duration;

use crate::network::range::NetworkSpec;

pub const DEFAULT_NETWORK: &str = "192.168.3.0/24";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_WORKERS: usize = 50;
pub const DEFAULT_TCP_PORT: u16 = 443;
pub const QUICK_WORKERS: usize = 100;
/// Written when `--output` is given without a path.
pub const DEFAULT_OUTPUT_FILE: &str = "scan_results.txt";

/// Which reachability mechanism the sweep uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Shell out to the system `ping` utility.
    Ping,
    /// TCP connect to the given port.
    Tcp { port: u16 },
}

pub struct ScanConfig {
    pub network: NetworkSpec,
    /// Per-probe timeout. The engine adds a fixed grace period on top.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub workers: usize,
    pub probe: ProbeKind,
    /// Where to persist the sorted results, if anywhere.
    pub output: Option<PathBuf>,
    /// Disables reverse lookups. Every host is reported as "Unknown".
    pub no_dns: bool,
    pub no_progress: bool,
    pub quiet: bool,
}
