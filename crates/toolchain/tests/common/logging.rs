//! # Test Logging
//!
//! Routes the library's `tracing` events through the test harness's captured output.

use tracing_subscriber::EnvFilter;

/// Installs a trace-level subscriber that writes through the test writer.
///
/// Safe to call from every test; only the first call installs the subscriber.
/// `RUST_LOG` overrides the level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    let _installed = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
