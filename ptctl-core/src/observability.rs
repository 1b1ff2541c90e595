//! Logging setup.
//!
//! Logs go to stderr so command output on stdout stays machine readable.

use crate::error::{PassthruError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Must be called once at
/// startup.
pub fn init(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| PassthruError::InvalidConfig {
            reason: format!("Invalid log level '{}': {}", default_level, e),
        })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| {
            PassthruError::Other(anyhow::anyhow!("Failed to initialize logging: {}", e))
        })?;

    tracing::debug!("Logging initialized");
    Ok(())
}
