use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use skyline_core::{Config, LocationError};
use skyline_services::{LocationClient, LocationStore, RetryConfig};
use tokio::runtime::{Handle, Runtime};

use crate::models::LocationListModel;

// Static tokio runtime that lives for the duration of the application
static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn get_or_init_runtime() -> Result<Handle> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime.handle().clone());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("skyline-tokio")
        .build()
        .context("Failed to create tokio runtime")?;

    // Another thread may have won the race; its runtime is the one kept.
    if RUNTIME.set(runtime).is_err() {
        tracing::debug!("Tokio runtime already initialized");
    }
    RUNTIME
        .get()
        .map(|r| r.handle().clone())
        .context("Tokio runtime unavailable")
}

/// Get the runtime handle (available after initialization)
pub fn get_runtime() -> Option<Handle> {
    RUNTIME.get().map(|r| r.handle().clone())
}

/// Everything a `LocationListModel` needs, built once at startup.
#[derive(Clone)]
pub struct LocationServices {
    pub store: Arc<dyn LocationStore>,
    pub runtime: Handle,
    pub user_id: String,
}

impl LocationServices {
    /// A model for the configured user. Call `reload()` on it to fetch the list.
    pub fn create_model(&self) -> LocationListModel {
        LocationListModel::new(self.store.clone(), self.runtime.clone(), self.user_id.clone())
    }
}

impl std::fmt::Debug for LocationServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationServices")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Initialize logging, the runtime, and the HTTP location client from `config`.
///
/// Fails if no user id is configured or the API URL is unusable.
pub fn initialize_location_services(config: &Config) -> Result<LocationServices> {
    skyline_core::init()?;

    let user_id = config
        .session
        .effective_user_id()
        .ok_or(LocationError::NoSession)?;

    tracing::info!(
        "Initializing location services with base_url: {}",
        config.services.location_api_url
    );

    let retry = RetryConfig::new(
        config.retry.max_retries,
        config.retry.initial_delay_ms,
        config.retry.max_delay_ms,
    );
    let client = LocationClient::new(
        &config.services.location_api_url,
        Duration::from_secs(config.services.request_timeout_secs),
        retry,
    )?;

    let runtime = get_or_init_runtime()?;

    tracing::info!("Location services initialized for user {}", user_id);
    Ok(LocationServices {
        store: Arc::new(client),
        runtime,
        user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(user: &str) -> Config {
        let mut config = Config::default();
        config.session.user_id = Some(user.to_string());
        config
    }

    #[test]
    fn test_initialize_builds_services_for_configured_user() {
        let services = initialize_location_services(&config_for("alice")).unwrap();

        assert_eq!(services.user_id, "alice");
        assert!(get_runtime().is_some());

        let model = services.create_model();
        assert_eq!(model.user_id(), "alice");
        assert!(model.current_sequence().is_empty());
    }

    #[test]
    fn test_initialize_requires_user() {
        let err = initialize_location_services(&config_for("   ")).unwrap_err();
        assert!(err.downcast_ref::<LocationError>().is_some());
    }

    #[test]
    fn test_initialize_rejects_bad_url() {
        let mut config = config_for("alice");
        config.services.location_api_url = "not a url".to_string();
        assert!(initialize_location_services(&config).is_err());
    }
}
