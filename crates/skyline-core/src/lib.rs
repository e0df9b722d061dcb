pub mod config;
pub mod error;

pub use config::{Config, RetrySettings, ServiceConfig, SessionConfig, ValidationResult};
pub use error::{AppError, ConfigError, LocationError, NetworkError};

use anyhow::Result;

/// Initialize logging. Safe to call more than once.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    tracing::info!("Skyline core initialized");
    Ok(())
}
