use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lanscan_common::error::ScanError;
use lanscan_common::network::host::{HostRecord, UNKNOWN_HOSTNAME};
use lanscan_common::network::range::NetworkSpec;
use lanscan_core::scanner::{EventHook, ScanCoordinator, ScanEvent};

use crate::fakes::{RecordingResolver, ScriptedProbe};

fn ip(a: u8, b: u8, c: u8, d: u8) -> Ipv4Addr {
    Ipv4Addr::new(a, b, c, d)
}

/// The smallest routable subnet: one live router, one silent host.
#[tokio::test]
async fn slash_30_with_one_router() {
    let probe = Arc::new(ScriptedProbe::new().alive(ip(10, 0, 0, 1), 5.0));
    let resolver = Arc::new(RecordingResolver::new().name(ip(10, 0, 0, 1), "router.local"));

    let report = ScanCoordinator::new(probe.clone(), resolver.clone())
        .with_timeout(Duration::from_secs(1))
        .with_concurrency(4)
        .run_str("10.0.0.0/30")
        .await
        .unwrap();

    assert_eq!(
        report.records,
        vec![HostRecord::new(ip(10, 0, 0, 1), 5.0).with_hostname("router.local")]
    );
    assert_eq!(probe.probed(), vec![ip(10, 0, 0, 1), ip(10, 0, 0, 2)]);
    assert_eq!(resolver.calls(), vec![ip(10, 0, 0, 1)]);
    assert_eq!(report.completed, 2);
    assert!(!report.interrupted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shuffled_completion_still_sorts_by_address() {
    let network: NetworkSpec = "172.16.5.0/26".parse().unwrap();
    let alive: Vec<Ipv4Addr> = network
        .hosts()
        .filter(|addr| addr.octets()[3] % 3 == 0 || addr.octets()[3] == 62)
        .collect();

    let probe = alive
        .iter()
        .fold(ScriptedProbe::new().with_jitter(15), |probe, addr| {
            probe.alive(*addr, f64::from(addr.octets()[3]))
        });
    let probe = Arc::new(probe);
    let resolver = Arc::new(RecordingResolver::new());

    let report = ScanCoordinator::new(probe.clone(), resolver.clone())
        .with_concurrency(16)
        .run(&network)
        .await
        .unwrap();

    let found: Vec<Ipv4Addr> = report.records.iter().map(|r| r.addr).collect();
    assert_eq!(found, alive);
    assert!(report.records.iter().all(|r| r.latency_ms == f64::from(r.addr.octets()[3])));
    assert_eq!(probe.probed().len(), 62);
    assert_eq!(report.completed, 62);
}

#[tokio::test]
async fn dead_hosts_are_never_resolved() {
    let probe = Arc::new(ScriptedProbe::new());
    let resolver = Arc::new(RecordingResolver::new());
    let scanner = ScanCoordinator::new(probe.clone(), resolver.clone());

    for _ in 0..2 {
        let report = scanner.run_str("192.168.50.0/29").await.unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.completed, 6);
    }

    assert!(resolver.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn never_more_probes_in_flight_than_workers() {
    let probe = Arc::new(ScriptedProbe::new().with_jitter(8));

    ScanCoordinator::new(probe.clone(), Arc::new(RecordingResolver::new()))
        .with_concurrency(7)
        .run_str("10.20.0.0/25")
        .await
        .unwrap();

    let peak = probe.peak_in_flight();
    assert!(peak <= 7, "peak in flight was {peak}");
    assert!(peak >= 1);
    assert_eq!(probe.probed().len(), 126);
}

#[tokio::test]
async fn progress_and_discoveries_are_reported() {
    let events: Arc<Mutex<Vec<ScanEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let hook: EventHook = Arc::new(move |event: &ScanEvent| sink.lock().unwrap().push(event.clone()));

    let probe = Arc::new(
        ScriptedProbe::new()
            .with_jitter(3)
            .alive(ip(10, 1, 1, 4), 1.0)
            .alive(ip(10, 1, 1, 9), 2.0),
    );

    // /27: 30 usable addresses
    ScanCoordinator::new(probe, Arc::new(RecordingResolver::new()))
        .with_events(hook)
        .run_str("10.1.1.0/27")
        .await
        .unwrap();

    let events = events.lock().unwrap();
    let progress: Vec<u64> = events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::Progress { completed, total } => {
                assert_eq!(*total, 30);
                Some(*completed)
            }
            _ => None,
        })
        .collect();
    let mut found: Vec<Ipv4Addr> = events
        .iter()
        .filter_map(|event| match event {
            ScanEvent::HostFound(record) => Some(record.addr),
            _ => None,
        })
        .collect();
    found.sort();

    assert_eq!(progress, vec![10, 20, 30]);
    assert_eq!(found, vec![ip(10, 1, 1, 4), ip(10, 1, 1, 9)]);
}

#[tokio::test]
async fn malformed_network_dispatches_nothing() {
    let probe = Arc::new(ScriptedProbe::new());

    let err = ScanCoordinator::new(probe.clone(), Arc::new(RecordingResolver::new()))
        .run_str("not-a-network")
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::InvalidNetworkSpec { .. }));
    assert!(probe.probed().is_empty());
}

#[tokio::test]
async fn point_to_point_and_single_host_sweeps() {
    let probe = Arc::new(ScriptedProbe::new().alive(ip(10, 0, 0, 0), 1.0));
    let scanner = ScanCoordinator::new(probe.clone(), Arc::new(RecordingResolver::new()));

    let report = scanner.run_str("10.0.0.0/31").await.unwrap();
    assert_eq!(report.total, 2);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].hostname, UNKNOWN_HOSTNAME);

    let report = scanner.run_str("10.0.0.77").await.unwrap();
    assert_eq!(report.total, 1);
    assert!(report.records.is_empty());

    assert_eq!(probe.probed(), vec![ip(10, 0, 0, 0), ip(10, 0, 0, 1), ip(10, 0, 0, 77)]);
}
