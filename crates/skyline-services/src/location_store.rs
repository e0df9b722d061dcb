//! Location store trait and error types.
//!
//! `LocationStore` is the authoritative, per-user ordered list of saved
//! locations. The UI layer only ever talks to it through this trait, so the
//! HTTP client and test doubles are interchangeable.

use async_trait::async_trait;
use thiserror::Error;

use crate::location::LocationRecord;

/// Errors that can occur during location store operations.
#[derive(Debug, Error)]
pub enum LocationStoreError {
    /// The store could not be reached (connect failure, timeout, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The store rejected the request. The message is meant for the user.
    #[error("{0}")]
    Server(String),

    /// The store answered successfully but the body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LocationStoreError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// True for transport-level failures, as opposed to a store rejection.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::InvalidResponse(_))
    }
}

impl From<reqwest::Error> for LocationStoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Result type for location store operations.
pub type LocationStoreResult<T> = Result<T, LocationStoreError>;

/// Remote, authoritative store of each user's ordered location list.
///
/// Mutating operations return the store's confirmation message.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Fetch the user's full list in persisted order.
    async fn fetch_locations(&self, user_id: &str) -> LocationStoreResult<Vec<LocationRecord>>;

    /// Append a location to the end of the user's list.
    ///
    /// # Errors
    /// Returns `LocationStoreError::Server` if the store refuses the name
    /// (for example, a duplicate).
    async fn add_location(
        &self,
        user_id: &str,
        name: &str,
        coordinates: Option<(f64, f64)>,
    ) -> LocationStoreResult<String>;

    /// Delete the location with exactly this name.
    async fn delete_location(&self, user_id: &str, name: &str) -> LocationStoreResult<String>;

    /// Replace the persisted order with `ordered_names`, last write wins.
    async fn replace_order(
        &self,
        user_id: &str,
        ordered_names: &[String],
    ) -> LocationStoreResult<String>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> LocationStoreResult<bool>;
}
