// --- File: crates/courtlink_availability/src/error.rs ---
use chrono::NaiveTime;
use courtlink_common::CourtlinkError;
use thiserror::Error;

/// Errors produced by the availability engine.
#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: NaiveTime, end: NaiveTime },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown location key: {0}")]
    UnknownLocation(String),
    #[error("Appointment source error: {0}")]
    Upstream(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<AvailabilityError> for CourtlinkError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::InvalidInterval { .. }
            | AvailabilityError::Validation(_)
            | AvailabilityError::UnknownLocation(_) => {
                CourtlinkError::ValidationError(err.to_string())
            }
            AvailabilityError::Upstream(message) => CourtlinkError::UpstreamError {
                service_name: "appointment source".to_string(),
                message,
            },
            AvailabilityError::Config(message) => CourtlinkError::ConfigError(message),
        }
    }
}
