//! Logging setup for the `digipin` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. Output goes to stderr so that stdout carries nothing but
//! codes and coordinates. The level is taken from `RUST_LOG` and defaults to
//! `info`.

use crate::error::DigipinError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`DigipinError::IoError`] if a global subscriber is already set.
pub fn init_logging() -> Result<(), DigipinError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .try_init()
        .map_err(|e| DigipinError::IoError(e.to_string()))
}
