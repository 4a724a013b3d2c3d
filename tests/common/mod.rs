//! Shared helpers for integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a test subscriber once. Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
