//! Tracing setup for embedding applications and tests.

use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber that reads its filter from
/// `RUST_LOG`.
///
/// Intended for binaries and tests embedding this crate; libraries layering
/// on top that install their own subscriber can skip this. Calling it more
/// than once is harmless, later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
