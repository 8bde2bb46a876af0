//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies to the given binary and to
/// the `mnk_server` / `mnk_shared` crates, while dependencies stay at `warn`.
///
/// Calling this more than once is harmless: later calls leave the first subscriber in place.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let bin_target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{bin_target}={default_level},mnk_server={default_level},mnk_shared={default_level},tower_http={default_level}"
        ))
    });

    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(true)
        .try_init();

    if result.is_ok() {
        tracing::debug!(bin = bin_name, level = default_level, "logger initialized");
    }
}
