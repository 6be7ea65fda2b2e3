//! Diagnostics for the launcher itself
//!
//! Everything goes to stderr so the launched binary owns stdout.

use tracing_subscriber::EnvFilter;

/// Filter variable, read the same way as `RUST_LOG`
pub const LOG_ENV: &str = "GREENLIGHT_LAUNCHER_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be set when embedded; keep that one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
