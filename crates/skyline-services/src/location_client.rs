//! HTTP/JSON client for the location API.
//!
//! Every call except adding a location goes through `send_idempotent`, which
//! resends transient failures under the configured `RetryConfig`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::location::{
    AddLocationRequest, DeleteLocationRequest, ErrorResponse, LocationListResponse,
    LocationRecord, MessageResponse, ReplaceOrderRequest,
};
use crate::location_store::{LocationStore, LocationStoreError, LocationStoreResult};
use crate::retry::{self, RetryConfig};

/// HTTP/JSON client for the location API.
#[derive(Debug, Clone)]
pub struct LocationClient {
    base_url: Url,
    client: Arc<Client>,
    retry: RetryConfig,
}

impl LocationClient {
    /// Create a client for `base_url` (e.g. `http://localhost:3000/api`).
    pub fn new(base_url: &str, timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid location API URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Location API URL cannot be used as a base: {}", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments.iter().copied());
        }
        url
    }

    /// The health endpoint lives beside the API prefix, not under it.
    fn health_url(&self) -> Url {
        let mut segments: Vec<String> = self
            .base_url
            .path_segments()
            .map(|parts| {
                parts
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if segments.last().map(String::as_str) == Some("api") {
            segments.pop();
        }
        segments.push("health".to_string());

        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(&segments);
        }
        url
    }

    /// Send a request that is safe to repeat, backing off between attempts.
    ///
    /// Returns the first outcome that is not transient, or the last one once
    /// the retry budget is spent.
    async fn send_idempotent<F>(&self, call: &str, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut retries = 0;
        loop {
            let outcome = build().send().await;
            if retries >= self.retry.max_retries || !retry::is_transient(&outcome) {
                if retries > 0 {
                    tracing::info!("{} finished after {} retries", call, retries);
                }
                return outcome;
            }

            retries += 1;
            let delay = self.retry.backoff(retries);
            match &outcome {
                Ok(response) => tracing::warn!(
                    "{} returned {}; retry {} of {} in {:?}",
                    call,
                    response.status(),
                    retries,
                    self.retry.max_retries,
                    delay
                ),
                Err(e) => tracing::warn!(
                    "{} failed: {}; retry {} of {} in {:?}",
                    call,
                    e,
                    retries,
                    self.retry.max_retries,
                    delay
                ),
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Check response status and extract the store's error message
    async fn check_response(response: Response) -> LocationStoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));

        tracing::warn!("Location API error ({}): {}", status, message);
        Err(LocationStoreError::Server(message))
    }

    async fn read_message(response: Response) -> LocationStoreResult<String> {
        let response = Self::check_response(response).await?;
        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }
}

#[async_trait]
impl LocationStore for LocationClient {
    async fn fetch_locations(&self, user_id: &str) -> LocationStoreResult<Vec<LocationRecord>> {
        let url = self.endpoint(&["locations", user_id]);
        tracing::debug!("Fetching locations: {}", url);

        let response = self
            .send_idempotent("Fetch locations", || self.client.get(url.clone()))
            .await?;
        let response = Self::check_response(response).await?;
        let body: LocationListResponse = response.json().await?;

        tracing::info!("Fetched {} locations for user {}", body.locations.len(), user_id);
        Ok(body.locations)
    }

    async fn add_location(
        &self,
        user_id: &str,
        name: &str,
        coordinates: Option<(f64, f64)>,
    ) -> LocationStoreResult<String> {
        let url = self.endpoint(&["locations"]);
        let request = AddLocationRequest {
            user_id: user_id.to_string(),
            location_name: name.to_string(),
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lon)| lon),
        };
        tracing::debug!("Adding location {:?} for user {}", name, user_id);

        // Sent once; see `retry`.
        let response = self.client.post(url).json(&request).send().await?;
        let message = Self::read_message(response).await?;

        tracing::info!("Added location {:?} for user {}", name, user_id);
        Ok(message)
    }

    async fn delete_location(&self, user_id: &str, name: &str) -> LocationStoreResult<String> {
        let url = self.endpoint(&["locations"]);
        let request = DeleteLocationRequest {
            user_id: user_id.to_string(),
            location_name: name.to_string(),
        };
        tracing::debug!("Deleting location {:?} for user {}", name, user_id);

        let response = self
            .send_idempotent("Delete location", || {
                self.client.delete(url.clone()).json(&request)
            })
            .await?;
        let message = Self::read_message(response).await?;

        tracing::info!("Deleted location {:?} for user {}", name, user_id);
        Ok(message)
    }

    async fn replace_order(
        &self,
        user_id: &str,
        ordered_names: &[String],
    ) -> LocationStoreResult<String> {
        let url = self.endpoint(&["locations", "order"]);
        let request = ReplaceOrderRequest {
            user_id: user_id.to_string(),
            locations: ordered_names.to_vec(),
        };
        tracing::debug!("Replacing order for user {}: {:?}", user_id, ordered_names);

        let response = self
            .send_idempotent("Replace order", || self.client.put(url.clone()).json(&request))
            .await?;
        let message = Self::read_message(response).await?;

        tracing::info!(
            "Persisted order of {} locations for user {}",
            ordered_names.len(),
            user_id
        );
        Ok(message)
    }

    async fn health_check(&self) -> LocationStoreResult<bool> {
        let url = self.health_url();
        tracing::debug!("Health check: {}", url);

        let response = self
            .send_idempotent("Health check", || self.client.get(url.clone()))
            .await?;
        Ok(response.status().is_success())
    }
}
