//! Shared logging setup for front ends driving the niche store.

/// Tracing configuration (filter, output format).
pub mod tracing;

/// Initialize process-wide logging.
///
/// Safe to call more than once; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
