use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lanscan_common::network::host::ProbeResult;
use lanscan_common::scanning::ReachabilityProbe;
use lanscan_common::network::range::NetworkSpec;
use lanscan_core::scanner::{EventHook, ScanCoordinator, ScanEvent};
use tokio_util::sync::CancellationToken;

use crate::fakes::{RecordingResolver, ScriptedProbe};

fn network(cidr: &str) -> NetworkSpec {
    cidr.parse().unwrap()
}

/// `.1` (dead), `.2` and `.3` (alive) finish strictly in that order.
/// Every other address hangs until it is abandoned.
#[derive(Default)]
struct ThreeThenHang {
    finished: AtomicUsize,
    started: AtomicUsize,
}

impl ThreeThenHang {
    async fn wait_for(&self, finished: usize) {
        while self.finished.load(Ordering::SeqCst) < finished {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ReachabilityProbe for ThreeThenHang {
    async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeResult {
        self.started.fetch_add(1, Ordering::SeqCst);
        let result = match addr.octets()[3] {
            1 => ProbeResult::dead(addr),
            2 => {
                self.wait_for(1).await;
                ProbeResult::alive(addr, 2.0)
            }
            3 => {
                self.wait_for(2).await;
                ProbeResult::alive(addr, 3.0)
            }
            _ => std::future::pending().await,
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        result
    }
}

// Single-threaded runtime: a probe's result is queued before the next probe
// can observe it as finished, which pins the collection order.
#[tokio::test]
async fn interrupt_keeps_what_was_collected() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let hook: EventHook = Arc::new(move |event: &ScanEvent| {
        if let ScanEvent::HostFound(record) = event {
            if record.addr == Ipv4Addr::new(10, 0, 0, 3) {
                trigger.cancel();
            }
        }
    });

    let probe = Arc::new(ThreeThenHang::default());
    let resolver = Arc::new(RecordingResolver::new());

    // /28 has 14 hosts; 10 workers means 10 dispatched probes
    let report = tokio::time::timeout(
        Duration::from_secs(5),
        ScanCoordinator::new(probe.clone(), resolver.clone())
            .with_concurrency(10)
            .with_events(hook)
            .run_until(&network("10.0.0.0/28"), cancel.clone()),
    )
    .await
    .expect("interrupted sweep should return promptly")
    .unwrap();

    assert!(report.interrupted);
    assert_eq!(report.completed, 3);
    assert_eq!(report.total, 14);
    let found: Vec<Ipv4Addr> = report.records.iter().map(|r| r.addr).collect();
    assert_eq!(found, vec![Ipv4Addr::new(10, 0, 0, 2), Ipv4Addr::new(10, 0, 0, 3)]);
    assert_eq!(resolver.calls(), found);
    // freed permits let a few more hanging probes start before the interrupt lands
    assert!(probe.started.load(Ordering::SeqCst) >= 10);
    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn interrupt_before_start_returns_nothing() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = ScanCoordinator::new(
        Arc::new(ThreeThenHang::default()),
        Arc::new(RecordingResolver::new()),
    )
    .run_until(&network("10.0.0.0/28"), cancel)
    .await
    .unwrap();

    assert!(report.interrupted);
    assert!(report.records.is_empty());
    assert_eq!(report.completed, 0);
}

#[tokio::test]
async fn coordinator_sweeps_fully_after_an_interrupted_run() {
    let probe = Arc::new(ScriptedProbe::new().alive(Ipv4Addr::new(10, 0, 0, 9), 1.0));
    let scanner = ScanCoordinator::new(probe.clone(), Arc::new(RecordingResolver::new()));
    let target = network("10.0.0.0/28");

    let interrupted = CancellationToken::new();
    interrupted.cancel();
    let first = scanner.run_until(&target, interrupted).await.unwrap();
    assert!(first.interrupted);

    let second = scanner
        .run_until(&target, CancellationToken::new())
        .await
        .unwrap();
    assert!(!second.interrupted);
    assert_eq!(second.completed, 14);
    let found: Vec<Ipv4Addr> = second.records.iter().map(|r| r.addr).collect();
    assert_eq!(found, vec![Ipv4Addr::new(10, 0, 0, 9)]);
}
