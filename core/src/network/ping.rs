use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lanscan_common::error::ProbeError;
use lanscan_common::network::host::ProbeResult;
use lanscan_common::scanning::ReachabilityProbe;
use tokio::process::Command;
use tracing::debug;

use crate::scanner::PROBE_GRACE;

/// Sends a single echo request through the system `ping` utility.
///
/// Needs no privileges of its own. A zero exit status means the host
/// replied. The child process is killed if the probe is abandoned.
#[derive(Debug, Default, Clone, Copy)]
pub struct PingProbe;

impl PingProbe {
    async fn ping(&self, addr: Ipv4Addr, limit: Duration) -> Result<Option<Duration>, ProbeError> {
        let mut cmd = ping_command(addr, limit);
        let start = Instant::now();

        let status = tokio::time::timeout(limit + PROBE_GRACE, cmd.status())
            .await
            .map_err(|_| ProbeError::Timeout(limit))??;

        Ok(status.success().then(|| start.elapsed()))
    }
}

#[async_trait]
impl ReachabilityProbe for PingProbe {
    async fn probe(&self, addr: Ipv4Addr, limit: Duration) -> ProbeResult {
        match self.ping(addr, limit).await {
            Ok(Some(elapsed)) => ProbeResult::alive_after(addr, elapsed),
            Ok(None) => ProbeResult::dead(addr),
            Err(e) => {
                debug!(%addr, "{e}");
                ProbeResult::dead(addr)
            }
        }
    }
}

fn ping_command(addr: Ipv4Addr, limit: Duration) -> Command {
    let mut cmd = Command::new("ping");
    cmd.args(ping_args(addr, limit))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd
}

#[cfg(target_os = "windows")]
fn ping_args(addr: Ipv4Addr, limit: Duration) -> Vec<String> {
    let millis = limit.as_millis().max(1).to_string();
    vec!["-n".into(), "1".into(), "-w".into(), millis, addr.to_string()]
}

#[cfg(target_os = "macos")]
fn ping_args(addr: Ipv4Addr, limit: Duration) -> Vec<String> {
    let secs = limit.as_secs().max(1).to_string();
    vec!["-c".into(), "1".into(), "-t".into(), secs, addr.to_string()]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn ping_args(addr: Ipv4Addr, limit: Duration) -> Vec<String> {
    // iputils only takes whole seconds for -W
    let secs = limit.as_secs().max(1).to_string();
    vec!["-c".into(), "1".into(), "-W".into(), secs, addr.to_string()]
}
