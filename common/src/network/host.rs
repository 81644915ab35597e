use std::net::Ipv4Addr;
use std::time::Duration;

/// Hostname reported when reverse resolution failed or was skipped.
pub const UNKNOWN_HOSTNAME: &str = "Unknown";

/// Outcome of one reachability probe. Produced once per dispatched task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub addr: Ipv4Addr,
    pub alive: bool,
    pub latency_ms: Option<f64>,
}

impl ProbeResult {
    pub fn alive(addr: Ipv4Addr, latency_ms: f64) -> Self {
        Self {
            addr,
            alive: true,
            latency_ms: Some(latency_ms),
        }
    }

    pub fn dead(addr: Ipv4Addr) -> Self {
        Self {
            addr,
            alive: false,
            latency_ms: None,
        }
    }

    /// Alive result with latency taken from a measured elapsed time.
    pub fn alive_after(addr: Ipv4Addr, elapsed: Duration) -> Self {
        Self::alive(addr, elapsed.as_secs_f64() * 1000.0)
    }
}

/// A host that answered the probe.
#[derive(Debug, Clone, PartialEq)]
pub struct HostRecord {
    pub addr: Ipv4Addr,
    pub hostname: String,
    pub latency_ms: f64,
}

impl HostRecord {
    pub fn new(addr: Ipv4Addr, latency_ms: f64) -> Self {
        Self {
            addr,
            hostname: UNKNOWN_HOSTNAME.to_string(),
            latency_ms,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn has_hostname(&self) -> bool {
        self.hostname != UNKNOWN_HOSTNAME
    }
}
