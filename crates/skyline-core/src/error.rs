//! Error types shared across Skyline crates.
//!
//! UI-facing errors convert into `AppError`, whose `user_message()` is safe
//! to show in a notice.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a notice-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Location list error: {0}")]
    Location(#[from] LocationError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display as a notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
        }
    }
}

/// Failures reaching the location server or reading its answer.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to reach the location server. Check your connection."
            }
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Saved-location list errors.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The store refused the request; the message comes from the store.
    #[error("Location store rejected request: {0}")]
    Rejected(String),

    /// Local validation failed before any request was sent.
    #[error("Invalid location: {0}")]
    Invalid(String),

    /// No signed-in user to load locations for.
    #[error("No active user session")]
    NoSession,

    #[error("Location service unavailable")]
    ServiceUnavailable,
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Rejected(_) => "The location server rejected the request.",
            LocationError::Invalid(_) => "Check the location name and try again.",
            LocationError::NoSession => "Please sign in to manage your locations.",
            LocationError::ServiceUnavailable => {
                "Location service unavailable. Please try again later."
            }
        }
    }
}
