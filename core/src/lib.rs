//! Scan engine for `lanscan`.
//!
//! * [`scanner`]: the coordinator that sweeps a network with bounded concurrency.
//! * [`network`]: concrete reachability probes (system ping, TCP connect).
//! * [`export`]: plain-text persistence of the results.

pub mod export;
pub mod network;
pub mod scanner;
