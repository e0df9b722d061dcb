use crate::services::location_service::LocationError;
use skyline_core::{AppError, LocationError as CoreLocationError, NetworkError};

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
            LocationError::InvalidResponse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            LocationError::Server(s) => AppError::Location(CoreLocationError::Rejected(s)),
            LocationError::Validation(s) => AppError::Location(CoreLocationError::Invalid(s)),
        }
    }
}
