//! Shared helpers for integration tests

pub mod builders;

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a tracing subscriber once, so failing tests can be re-run with
/// RUST_LOG=debug for the engine's event log.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
