//! Unified test logging initialization
//!
//! This module provides a unified logging initialization function that can be
//! used across both unit tests and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The level is read from `TEST_LOG`, then
/// `RUST_LOG`, and defaults to `"warn"`.
///
/// The subscriber uses `with_test_writer()` so output is captured by the
/// test harness and `without_time()` for stable output.
pub fn init() {
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
            .ok(); // Never panic if something else already initialized
    });
}
