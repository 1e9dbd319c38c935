//! Telemetry setup
//!
//! Only binaries call into this module. Library crates emit `tracing` events and
//! leave subscriber installation to the process entry point.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a JSON subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json())
        .init();
}

/// Installs a human-readable subscriber, for local development.
pub fn init_pretty_telemetry() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().pretty())
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
