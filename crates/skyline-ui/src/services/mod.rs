pub mod location_service;

pub use location_service::{
    request_add, request_delete, request_fetch, request_health_check, request_replace_order,
    LocationError, LocationServiceMessage,
};
