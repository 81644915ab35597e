use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lanscan_common::network::host::{ProbeResult, UNKNOWN_HOSTNAME};
use lanscan_common::scanning::{NameResolver, ReachabilityProbe};

/// Probe with a fixed answer per address and a random delay, so results
/// complete in arbitrary order. Tracks how many probes overlap.
#[derive(Default)]
pub struct ScriptedProbe {
    alive: HashMap<Ipv4Addr, f64>,
    max_delay_ms: u64,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    probed: Mutex<Vec<Ipv4Addr>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alive(mut self, addr: Ipv4Addr, latency_ms: f64) -> Self {
        self.alive.insert(addr, latency_ms);
        self
    }

    pub fn with_jitter(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn probed(&self) -> Vec<Ipv4Addr> {
        let mut probed = self.probed.lock().unwrap().clone();
        probed.sort();
        probed
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedProbe {
    async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        self.probed.lock().unwrap().push(addr);

        if self.max_delay_ms > 0 {
            let delay = rand::random_range(0..=self.max_delay_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.alive.get(&addr) {
            Some(latency) => ProbeResult::alive(addr, *latency),
            None => ProbeResult::dead(addr),
        }
    }
}

/// Resolver with canned names that remembers every address it was asked about.
#[derive(Default)]
pub struct RecordingResolver {
    names: HashMap<Ipv4Addr, String>,
    calls: Mutex<Vec<Ipv4Addr>>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, addr: Ipv4Addr, hostname: &str) -> Self {
        self.names.insert(addr, hostname.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Ipv4Addr> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl NameResolver for RecordingResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> String {
        self.calls.lock().unwrap().push(addr);
        self.names
            .get(&addr)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_HOSTNAME.to_string())
    }
}
