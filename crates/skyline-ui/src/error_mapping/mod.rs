//! Maps UI service errors to skyline_core::AppError for consistent user-facing messages.

mod location;
