//! The two seams the scan engine depends on.
//!
//! Implementations must fold every failure into data: a probe that cannot
//! run reports the host as dead, a resolver that cannot find a name reports
//! [`UNKNOWN_HOSTNAME`](crate::network::host::UNKNOWN_HOSTNAME). Neither
//! may block past its own timeout.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;

use crate::network::host::ProbeResult;

/// Single liveness check against one address.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Should return within `timeout` plus a small grace period. Latency is
    /// the wall-clock time around the check, in milliseconds.
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeResult;
}

/// Best-effort reverse name lookup.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, addr: Ipv4Addr) -> String;
}
