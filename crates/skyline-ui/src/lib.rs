//! Saved-location list for Skyline: ordering, drag reordering, and sync with
//! the location store.

pub mod bridge;
mod error_mapping;
pub mod models;
pub mod services;

pub use bridge::{initialize_location_services, LocationServices};
pub use models::{LocationListModel, MoveIntent, Notice, NoticeLevel};
