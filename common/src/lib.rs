//! Shared model for the `lanscan` workspace.
//!
//! Everything the scan engine and its callers agree on lives here: the
//! parsed target network and its host enumeration, the per-host result
//! types, the probe and resolver seams, the error taxonomy and the
//! run configuration.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod scanning;

#[doc(hidden)]
pub use tracing as __tracing;
