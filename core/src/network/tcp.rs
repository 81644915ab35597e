use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lanscan_common::config::DEFAULT_TCP_PORT;
use lanscan_common::error::ProbeError;
use lanscan_common::network::host::ProbeResult;
use lanscan_common::scanning::ReachabilityProbe;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Unprivileged liveness check via a TCP handshake.
///
/// A completed handshake and an active refusal both prove that something
/// answered at the address.
pub struct TcpProbe {
    port: u16,
}

impl TcpProbe {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    async fn handshake(&self, addr: Ipv4Addr, limit: Duration) -> Result<Duration, ProbeError> {
        let socket_addr = SocketAddr::new(IpAddr::V4(addr), self.port);
        let start = Instant::now();

        match timeout(limit, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => Ok(start.elapsed()),
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => Ok(start.elapsed()),
            Ok(Err(e)) => Err(ProbeError::Execution(e)),
            Err(_elapsed) => Err(ProbeError::Timeout(limit)),
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TCP_PORT)
    }
}

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    async fn probe(&self, addr: Ipv4Addr, limit: Duration) -> ProbeResult {
        match self.handshake(addr, limit).await {
            Ok(elapsed) => ProbeResult::alive_after(addr, elapsed),
            Err(e) => {
                debug!(%addr, port = self.port, "{e}");
                ProbeResult::dead(addr)
            }
        }
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
