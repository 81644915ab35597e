//! Log targets understood by the terminal formatter.
//!
//! Library crates only emit events. The binary decides how they look.

/// Events on this target carry a pre-rendered `raw_msg` field that is
/// written verbatim, without level decoration.
pub const PRINT_TARGET: &str = "lanscan::print";

/// Informational events that mark a positive outcome.
pub const SUCCESS_TARGET: &str = "lanscan::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "lanscan::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! raw_print {
    ($msg:expr) => {
        $crate::__tracing::info!(target: "lanscan::print", raw_msg = %$msg)
    };
}
