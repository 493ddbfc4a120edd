//! Shared support for the integration tests under tests/.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing once per test binary. Honors `RUST_LOG`; defaults to
/// warn so test output stays quiet unless asked for.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
