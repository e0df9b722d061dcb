//! Resend policy for the idempotent location calls.
//!
//! Fetch, delete, replace-order and health carry the full intended state, so
//! sending them twice is harmless. Adding a location is never resent: a lost
//! response followed by a resend would come back as a duplicate-name rejection.

use std::time::Duration;

use reqwest::{Response, StatusCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Resends after the first attempt
    pub max_retries: u32,
    /// Wait before the first resend; doubles for each one after
    pub initial_delay: Duration,
    /// Upper bound on any single wait
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3, 100, 5000)
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    /// Send every request exactly once.
    pub fn none() -> Self {
        Self::new(0, 0, 0)
    }

    /// Wait before resend number `retry`, counting from 1.
    pub fn backoff(&self, retry: u32) -> Duration {
        let doublings = retry.saturating_sub(1).min(31);
        self.initial_delay
            .saturating_mul(1u32 << doublings)
            .min(self.max_delay)
    }
}

/// Statuses a location server returns while overloaded or restarting.
pub fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
}

/// Whether a send outcome is worth repeating.
///
/// Connect failures and timeouts are; malformed requests and 4xx rejections are not.
pub fn is_transient(outcome: &Result<Response, reqwest::Error>) -> bool {
    match outcome {
        Ok(response) => is_transient_status(response.status()),
        Err(e) => e.is_timeout() || e.is_connect() || e.status().is_some_and(is_transient_status),
    }
}
