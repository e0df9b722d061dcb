//! Location backend: async calls against the location store.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use skyline_core::AppError;
use skyline_services::{LocationRecord, LocationStore, LocationStoreError};
use tokio::runtime::Handle;

/// Error type for location operations
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// The store could not be reached.
    Network(String),
    /// The store answered, but not with anything decodable.
    InvalidResponse(String),
    /// The store refused the request; the message is the store's own.
    Server(String),
    /// Rejected locally before any request was sent.
    Validation(String),
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::Network(s) => write!(f, "Network error: {}", s),
            LocationError::InvalidResponse(s) => write!(f, "Invalid response: {}", s),
            LocationError::Server(s) => write!(f, "{}", s),
            LocationError::Validation(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for LocationError {}

impl From<LocationStoreError> for LocationError {
    fn from(e: LocationStoreError) -> Self {
        match e {
            LocationStoreError::Network(message) => LocationError::Network(message),
            LocationStoreError::Server(message) => LocationError::Server(message),
            LocationStoreError::InvalidResponse(message) => LocationError::InvalidResponse(message),
        }
    }
}

impl LocationError {
    /// Text shown to the user. Store and validation messages pass through as-is.
    pub fn user_notice(&self) -> String {
        match self {
            LocationError::Server(s) | LocationError::Validation(s) => s.clone(),
            LocationError::Network(_) | LocationError::InvalidResponse(_) => {
                AppError::from(self.clone()).user_message().to_string()
            }
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum LocationServiceMessage {
    /// Result of loading the user's list. `generation` identifies the request.
    FetchDone {
        generation: u64,
        result: Result<Vec<LocationRecord>, LocationError>,
    },
    /// Result of persisting a full order.
    CommitDone {
        commit_id: u64,
        result: Result<String, LocationError>,
    },
    AddDone {
        name: String,
        result: Result<String, LocationError>,
    },
    DeleteDone {
        name: String,
        result: Result<String, LocationError>,
    },
    HealthDone(Result<bool, LocationError>),
}

/// Request the user's list. Sends `FetchDone` when complete.
pub fn request_fetch(
    tx: &Sender<LocationServiceMessage>,
    runtime: &Handle,
    store: Arc<dyn LocationStore>,
    user_id: String,
    generation: u64,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store
            .fetch_locations(&user_id)
            .await
            .map_err(LocationError::from);
        let _ = tx.send(LocationServiceMessage::FetchDone { generation, result });
    });
}

/// Persist `sequence` as the user's full order. Sends `CommitDone` when complete.
pub fn request_replace_order(
    tx: &Sender<LocationServiceMessage>,
    runtime: &Handle,
    store: Arc<dyn LocationStore>,
    user_id: String,
    sequence: Vec<String>,
    commit_id: u64,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store
            .replace_order(&user_id, &sequence)
            .await
            .map_err(LocationError::from);
        let _ = tx.send(LocationServiceMessage::CommitDone { commit_id, result });
    });
}

/// Append a location. Sends `AddDone` when complete.
pub fn request_add(
    tx: &Sender<LocationServiceMessage>,
    runtime: &Handle,
    store: Arc<dyn LocationStore>,
    user_id: String,
    name: String,
    coordinates: Option<(f64, f64)>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store
            .add_location(&user_id, &name, coordinates)
            .await
            .map_err(LocationError::from);
        let _ = tx.send(LocationServiceMessage::AddDone { name, result });
    });
}

/// Delete a location by name. Sends `DeleteDone` when complete.
pub fn request_delete(
    tx: &Sender<LocationServiceMessage>,
    runtime: &Handle,
    store: Arc<dyn LocationStore>,
    user_id: String,
    name: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store
            .delete_location(&user_id, &name)
            .await
            .map_err(LocationError::from);
        let _ = tx.send(LocationServiceMessage::DeleteDone { name, result });
    });
}

pub fn request_health_check(
    tx: &Sender<LocationServiceMessage>,
    runtime: &Handle,
    store: Arc<dyn LocationStore>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store.health_check().await.map_err(LocationError::from);
        let _ = tx.send(LocationServiceMessage::HealthDone(result));
    });
}
