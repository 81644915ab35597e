//! Reverse name resolution for hosts that answered.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use dns_lookup::lookup_addr;
use lanscan_common::error::ResolveError;
use lanscan_common::network::host::UNKNOWN_HOSTNAME;
use lanscan_common::scanning::NameResolver;
use tracing::debug;

/// How long a single reverse lookup may take.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(2);

/// Resolves through the system resolver (`getnameinfo`).
///
/// The call is blocking, so it runs on tokio's blocking pool under
/// [`RESOLVE_TIMEOUT`]. A lookup that times out keeps its blocking thread
/// until the OS gives up, but the sweep does not wait for it.
pub struct ReverseDnsResolver {
    timeout: Duration,
}

impl ReverseDnsResolver {
    pub fn new() -> Self {
        Self {
            timeout: RESOLVE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn lookup(&self, addr: Ipv4Addr) -> Result<String, ResolveError> {
        let ip = IpAddr::V4(addr);
        let joined = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || lookup_addr(&ip)),
        )
        .await
        .map_err(|_| ResolveError::Timeout)?;

        let hostname = joined.map_err(|e| ResolveError::Join(e.to_string()))??;

        // getnameinfo falls back to the numeric form when there is no PTR record
        if hostname.is_empty() || hostname == addr.to_string() {
            return Err(ResolveError::NumericOnly);
        }
        Ok(hostname)
    }
}

impl Default for ReverseDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameResolver for ReverseDnsResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> String {
        match self.lookup(addr).await {
            Ok(hostname) => hostname,
            Err(e) => {
                debug!(%addr, "{e}");
                UNKNOWN_HOSTNAME.to_string()
            }
        }
    }
}

/// Never looks anything up.
pub struct NoopResolver;

#[async_trait]
impl NameResolver for NoopResolver {
    async fn resolve(&self, _addr: Ipv4Addr) -> String {
        UNKNOWN_HOSTNAME.to_string()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
