//! Mutable state of one sweep.
//!
//! A fresh [`ScanSession`] is built for every run and consumed into a
//! [`ScanReport`] at the end. The completed counter and the record list sit
//! behind one mutex so a result is always counted and stored together.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use lanscan_common::network::host::{HostRecord, ProbeResult};
use lanscan_common::network::range::NetworkSpec;
use tracing::debug;

use super::PROGRESS_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Enumerating,
    Dispatching,
    Collecting,
    Sorted,
    Done,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Enumerating => "enumerating",
            ScanPhase::Dispatching => "dispatching",
            ScanPhase::Collecting => "collecting",
            ScanPhase::Sorted => "sorted",
            ScanPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Final, address-sorted outcome of a sweep.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub network: NetworkSpec,
    pub records: Vec<HostRecord>,
    /// Probes whose result was collected.
    pub completed: u64,
    /// Host addresses in the target network.
    pub total: u64,
    pub elapsed: Duration,
    /// The sweep was cancelled; `records` only covers `completed` probes.
    pub interrupted: bool,
}

impl ScanReport {
    pub fn alive_count(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug)]
pub(crate) struct Tally {
    pub completed: u64,
    pub total: u64,
    pub found: Option<HostRecord>,
}

impl Tally {
    pub fn is_progress_boundary(&self) -> bool {
        self.completed % PROGRESS_STEP == 0 || self.completed == self.total
    }
}

#[derive(Default)]
struct SessionState {
    completed: u64,
    records: Vec<HostRecord>,
}

pub(crate) struct ScanSession {
    network: NetworkSpec,
    timeout: Duration,
    max_concurrency: usize,
    total: u64,
    phase: ScanPhase,
    state: Mutex<SessionState>,
}

impl ScanSession {
    pub fn new(network: NetworkSpec, timeout: Duration, max_concurrency: usize) -> Self {
        Self {
            network,
            timeout,
            max_concurrency,
            total: 0,
            phase: ScanPhase::Idle,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn enter(&mut self, phase: ScanPhase) {
        debug!(
            network = %self.network,
            timeout = ?self.timeout,
            workers = self.max_concurrency,
            "{} -> {}",
            self.phase,
            phase
        );
        self.phase = phase;
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn completed(&self) -> u64 {
        self.lock().completed
    }

    /// Counts one finished probe and, when `hostname` is given, stores the
    /// host. Both happen under the same lock.
    pub fn record(&self, result: ProbeResult, hostname: Option<String>) -> Tally {
        let found = match (result.alive, hostname) {
            (true, Some(hostname)) => Some(
                HostRecord::new(result.addr, result.latency_ms.unwrap_or_default())
                    .with_hostname(hostname),
            ),
            _ => None,
        };

        let mut state = self.lock();
        state.completed += 1;
        if let Some(record) = &found {
            state.records.push(record.clone());
        }

        Tally {
            completed: state.completed,
            total: self.total,
            found,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Sorts the collected records and closes the session.
    pub fn finish(&mut self, interrupted: bool, elapsed: Duration) -> ScanReport {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        let completed = state.completed;
        let mut records = std::mem::take(&mut state.records);

        records.sort_by_key(|record| u32::from(record.addr));
        records.dedup_by_key(|record| record.addr);
        self.enter(ScanPhase::Sorted);

        let report = ScanReport {
            network: self.network,
            records,
            completed,
            total: self.total,
            elapsed,
            interrupted,
        };
        self.enter(ScanPhase::Done);
        report
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
