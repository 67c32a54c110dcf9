//! Diagnostic logging
//!
//! Everything human-readable goes to stderr through `tracing`; stdout is
//! reserved for the orchestrator's JSON channel.

use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the stderr subscriber.
///
/// The level comes from the resource's `log_level` setting (`error`,
/// `debug`, anything else means `info`); a `RUST_LOG` environment variable
/// overrides it when set. Safe to call more than once.
pub fn init(log_level: &str) {
    INIT.call_once(|| {
        let default = match log_level.to_ascii_lowercase().as_str() {
            "error" => "error",
            "debug" => "debug",
            _ => "info",
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .ok();
    });
}
