//! Location storage services for Skyline.
//!
//! Provides the `LocationStore` seam and its HTTP/JSON implementation.

pub mod location;
pub mod location_client;
pub mod location_store;
pub mod retry;

pub use location::LocationRecord;
pub use location_client::LocationClient;
pub use location_store::{LocationStore, LocationStoreError, LocationStoreResult};
pub use retry::RetryConfig;
