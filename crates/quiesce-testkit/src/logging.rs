//! Tracing initialization for test runs.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a fmt subscriber honoring `RUST_LOG`, once per process.
///
/// Safe to call from every test; later calls are no-ops. Output goes
/// through the test writer so it is captured per test.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
