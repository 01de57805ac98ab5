#![cfg(test)]

//! Test logging for the crate's unit tests.
//!
//! One-time guarded so it can run from the `ctor` hook in `lib.rs` and from
//! individual tests without double initialization.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then `"warn"`.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // Critical for cargo/nextest capture
            .without_time()
            .try_init()
            .ok();
    });
}
