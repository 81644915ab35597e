//! # Error Taxonomy
//!
//! Only [`ScanError`] ever reaches the user. [`ProbeError`] and
//! [`ResolveError`] exist so that probe and resolver implementations can
//! propagate with `?` internally; both are folded into plain data ("dead",
//! "Unknown") at the trait boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The target could not be parsed as an IPv4 CIDR block.
    #[error("invalid network '{input}': {reason}")]
    InvalidNetworkSpec { input: String, reason: String },

    /// The bounded worker pool could not be set up.
    #[error("cannot start worker pool: {0}")]
    WorkerPool(String),

    /// Persisting the results failed. The in-memory results stay valid.
    #[error("failed to write results to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub fn invalid_network(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNetworkSpec {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no reply within {0:?}")]
    Timeout(std::time::Duration),

    /// The probe mechanism itself could not run (missing binary, permissions).
    #[error("probe could not run: {0}")]
    Execution(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("reverse lookup failed: {0}")]
    Lookup(#[from] io::Error),

    #[error("reverse lookup timed out")]
    Timeout,

    /// The resolver only echoed the numeric address back.
    #[error("no name on record")]
    NumericOnly,

    #[error("lookup task failed: {0}")]
    Join(String),
}
