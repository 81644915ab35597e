//! The scan **coordinator**.
//!
//! Sweeps every host address of a [`NetworkSpec`] with a
//! [`ReachabilityProbe`], resolves a name for each host that answered and
//! hands back the results sorted by address.
//!
//! **Concurrency model:**
//! A dispatcher task walks the enumerated addresses in order and spawns one
//! probe task per address, each holding a semaphore permit for its whole
//! lifetime, so no more than `max_concurrency` probes are ever in flight.
//! Finished probes push their [`ProbeResult`] into a channel drained by a
//! single collector, which owns name resolution and all session updates.
//! Completion order is therefore arbitrary; only the final sort makes the
//! output deterministic.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lanscan_common::config::DEFAULT_WORKERS;
use lanscan_common::error::ScanError;
use lanscan_common::network::host::{HostRecord, ProbeResult, UNKNOWN_HOSTNAME};
use lanscan_common::network::range::{HostAddresses, NetworkSpec};
use lanscan_common::scanning::{NameResolver, ReachabilityProbe};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{self, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

mod resolver;
mod session;

pub use resolver::{NoopResolver, RESOLVE_TIMEOUT, ReverseDnsResolver};
pub use session::{ScanPhase, ScanReport};

use session::ScanSession;

/// Slack granted to a probe on top of its own timeout before the
/// coordinator gives up on it.
pub const PROBE_GRACE: Duration = Duration::from_secs(1);

/// Progress is reported every this many completed probes.
pub const PROGRESS_STEP: u64 = 10;

/// Something the caller may want to show while the sweep runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// A host answered and has been recorded.
    HostFound(HostRecord),
    /// Emitted at every [`PROGRESS_STEP`] boundary and once at completion.
    Progress { completed: u64, total: u64 },
}

impl ScanEvent {
    pub fn percent(completed: u64, total: u64) -> f64 {
        if total == 0 {
            return 100.0;
        }
        completed as f64 / total as f64 * 100.0
    }
}

pub type EventHook = Arc<dyn Fn(&ScanEvent) + Send + Sync>;

pub struct ScanCoordinator {
    probe: Arc<dyn ReachabilityProbe>,
    resolver: Arc<dyn NameResolver>,
    timeout: Duration,
    max_concurrency: usize,
    on_event: Option<EventHook>,
}

impl ScanCoordinator {
    pub fn new(probe: Arc<dyn ReachabilityProbe>, resolver: Arc<dyn NameResolver>) -> Self {
        Self {
            probe,
            resolver,
            timeout: lanscan_common::config::DEFAULT_TIMEOUT,
            max_concurrency: DEFAULT_WORKERS,
            on_event: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_events(mut self, hook: EventHook) -> Self {
        self.on_event = Some(hook);
        self
    }

    /// Parses `network` and sweeps it. Parsing fails before anything is
    /// dispatched.
    pub async fn run_str(&self, network: &str) -> Result<ScanReport, ScanError> {
        let spec: NetworkSpec = network.parse()?;
        self.run(&spec).await
    }

    /// Sweeps every host address of `network` to completion.
    pub async fn run(&self, network: &NetworkSpec) -> Result<ScanReport, ScanError> {
        self.run_until(network, CancellationToken::new()).await
    }

    /// Sweeps every host address of `network` until `cancel` fires.
    ///
    /// Individual probe or lookup failures never abort the sweep. After a
    /// cancellation the hosts collected so far are returned with
    /// [`ScanReport::interrupted`] set. The token only governs this run.
    pub async fn run_until(
        &self,
        network: &NetworkSpec,
        cancel: CancellationToken,
    ) -> Result<ScanReport, ScanError> {
        if self.max_concurrency == 0 {
            return Err(ScanError::WorkerPool(
                "concurrency limit must be at least 1".to_string(),
            ));
        }
        let permits = self.max_concurrency.min(Semaphore::MAX_PERMITS);
        let start_time = Instant::now();

        let mut session = ScanSession::new(*network, self.timeout, permits);
        session.enter(ScanPhase::Enumerating);
        let addrs: HostAddresses = network.hosts();
        session.set_total(addrs.remaining());

        session.enter(ScanPhase::Dispatching);
        let (tx, mut rx) = mpsc::unbounded_channel::<ProbeResult>();
        let stop_dispatch = cancel.child_token();
        let dispatcher = tokio::spawn(dispatch(
            addrs,
            Arc::new(Semaphore::new(permits)),
            Arc::clone(&self.probe),
            self.timeout,
            tx,
            stop_dispatch.clone(),
        ));

        session.enter(ScanPhase::Collecting);
        let mut interrupted = false;
        loop {
            let received = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    interrupted = true;
                    break;
                }
                received = rx.recv() => received,
            };

            match received {
                Some(result) => {
                    if !self.collect(&session, result, &cancel).await {
                        interrupted = true;
                        break;
                    }
                }
                None => break,
            }
        }

        // The dispatcher drops its task set on the way out, aborting whatever
        // is still in flight.
        stop_dispatch.cancel();
        if let Err(e) = dispatcher.await {
            warn!("dispatcher ended abnormally: {e}");
        }

        if interrupted {
            debug!(
                completed = session.completed(),
                total = session.total(),
                "sweep interrupted, keeping partial results"
            );
        }

        let report = session.finish(interrupted, start_time.elapsed());
        debug!(phase = %session.phase(), alive = report.alive_count(), "sweep finished");
        Ok(report)
    }

    /// Records one result. Returns `false` when the sweep was cancelled
    /// while the host's name was being looked up; that host is dropped.
    async fn collect(
        &self,
        session: &ScanSession,
        result: ProbeResult,
        cancel: &CancellationToken,
    ) -> bool {
        let hostname = if result.alive {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return false,
                hostname = self.resolve(result.addr) => Some(hostname),
            }
        } else {
            None
        };

        let tally = session.record(result, hostname);
        let at_boundary = tally.is_progress_boundary();

        if let Some(record) = tally.found {
            self.emit(&ScanEvent::HostFound(record));
        }
        if at_boundary {
            self.emit(&ScanEvent::Progress {
                completed: tally.completed,
                total: tally.total,
            });
        }
        true
    }

    async fn resolve(&self, addr: Ipv4Addr) -> String {
        let deadline = RESOLVE_TIMEOUT + PROBE_GRACE;
        match tokio::time::timeout(deadline, self.resolver.resolve(addr)).await {
            Ok(hostname) => hostname,
            Err(_) => {
                debug!(%addr, "name resolution overran {deadline:?}");
                UNKNOWN_HOSTNAME.to_string()
            }
        }
    }

    fn emit(&self, event: &ScanEvent) {
        if let Some(hook) = &self.on_event {
            hook(event);
        }
    }
}

async fn dispatch(
    addrs: HostAddresses,
    semaphore: Arc<Semaphore>,
    probe: Arc<dyn ReachabilityProbe>,
    timeout: Duration,
    tx: mpsc::UnboundedSender<ProbeResult>,
    cancel: CancellationToken,
) {
    let mut tasks: JoinSet<()> = JoinSet::new();
    let mut in_flight: HashMap<task::Id, Ipv4Addr> = HashMap::new();

    for addr in addrs {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            permit = Arc::clone(&semaphore).acquire_owned() => permit,
        };
        let Ok(permit) = permit else {
            warn!("worker pool closed, stopping dispatch");
            break;
        };

        let probe = Arc::clone(&probe);
        let result_tx = tx.clone();
        let handle = tasks.spawn(async move {
            let result = run_probe(probe.as_ref(), addr, timeout).await;
            drop(permit);
            let _ = result_tx.send(result);
        });
        in_flight.insert(handle.id(), addr);

        while let Some(joined) = tasks.try_join_next_with_id() {
            reap(joined, &mut in_flight, &tx);
        }
    }

    loop {
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            joined = tasks.join_next_with_id() => joined,
        };
        match joined {
            Some(joined) => reap(joined, &mut in_flight, &tx),
            None => break,
        }
    }
}

/// A probe task that died without reporting still counts as a dead host.
fn reap(
    joined: Result<(task::Id, ()), task::JoinError>,
    in_flight: &mut HashMap<task::Id, Ipv4Addr>,
    tx: &mpsc::UnboundedSender<ProbeResult>,
) {
    match joined {
        Ok((id, ())) => {
            in_flight.remove(&id);
        }
        Err(e) => {
            if let Some(addr) = in_flight.remove(&e.id()) {
                if e.is_panic() {
                    warn!(%addr, "probe task panicked, marking host as dead");
                    let _ = tx.send(ProbeResult::dead(addr));
                }
            }
        }
    }
}

async fn run_probe(probe: &dyn ReachabilityProbe, addr: Ipv4Addr, timeout: Duration) -> ProbeResult {
    let deadline = timeout + PROBE_GRACE;
    match tokio::time::timeout(deadline, probe.probe(addr, timeout)).await {
        Ok(result) if result.addr == addr => result,
        Ok(result) => {
            warn!(%addr, reported = %result.addr, "probe answered for the wrong address");
            ProbeResult { addr, ..result }
        }
        Err(_) => {
            debug!(%addr, "probe overran {deadline:?}, marking host as dead");
            ProbeResult::dead(addr)
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
