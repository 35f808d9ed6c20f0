#![cfg(test)]

//! Logging initialization for unit tests.
//!
//! Idempotent and race-safe; the level comes from `TEST_LOG`, then
//! `RUST_LOG`, then defaults to `warn`. Uses `with_test_writer()` so output
//! lands in cargo's per-test capture.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

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
            .ok();
    });
}
