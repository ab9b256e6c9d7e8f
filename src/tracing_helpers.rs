//! Zero-cost logging hooks for the tree engine.
//!
//! With the `tracing` feature these forward to the `tracing` crate; without it
//! they expand to nothing, so the `no_std` build pays nothing for them.
//!
//! ```bash
//! RUST_LOG=osavl=trace cargo run --features tracing
//! ```

#![allow(unused_macros, unused_imports)]

/// Trace-level event (rotations, per-insert detail).
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event (bulk operations).
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
