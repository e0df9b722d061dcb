//! Saved location records and the JSON shapes exchanged with the location API.

use serde::{Deserialize, Serialize};

/// A location saved in a user's list.
///
/// Identity is the exact, case-sensitive `name`; coordinates are fixed when the
/// record is created and are absent for manually added names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "location_name", alias = "location")]
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_coordinates(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Both coordinates, when the record was saved from a position fix.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Response of `GET /locations/{userId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationListResponse {
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
}

/// Request body of `POST /locations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLocationRequest {
    pub user_id: String,
    pub location_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Request body of `DELETE /locations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLocationRequest {
    pub user_id: String,
    pub location_name: String,
}

/// Request body of `PUT /locations/order`. Always the complete order, never a diff.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOrderRequest {
    pub user_id: String,
    pub locations: Vec<String>,
}

/// Confirmation body returned by mutating endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
