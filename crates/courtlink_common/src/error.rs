// --- File: crates/courtlink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Courtlink errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for CourtlinkError.
#[derive(Error, Debug)]
pub enum CourtlinkError {
    /// Error occurred during validation of caller-supplied input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while calling an upstream appointment or location source
    #[error("Upstream service error: {service_name} - {message}")]
    UpstreamError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// The engine itself never serves HTTP, but the REST layer that consumes it
/// maps errors through this trait when serializing failures.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CourtlinkError {
    fn status_code(&self) -> u16 {
        match self {
            CourtlinkError::ValidationError(_) => 400,
            CourtlinkError::ConfigError(_) => 500,
            CourtlinkError::ParseError(_) => 400,
            CourtlinkError::HttpError(_) => 500,
            CourtlinkError::UpstreamError { .. } => 502,
            CourtlinkError::NotFoundError(_) => 404,
            CourtlinkError::TimeoutError(_) => 504,
            CourtlinkError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
///
/// This trait can be implemented by error types to provide a consistent way
/// to add context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, CourtlinkError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, CourtlinkError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, CourtlinkError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| CourtlinkError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CourtlinkError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| CourtlinkError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for CourtlinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CourtlinkError::TimeoutError(err.to_string())
        } else {
            CourtlinkError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CourtlinkError {
    fn from(err: serde_json::Error) -> Self {
        CourtlinkError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> CourtlinkError {
    CourtlinkError::ValidationError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> CourtlinkError {
    CourtlinkError::ConfigError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CourtlinkError {
    CourtlinkError::NotFoundError(message.to_string())
}

pub fn upstream_error<T: fmt::Display>(service_name: &str, message: T) -> CourtlinkError {
    CourtlinkError::UpstreamError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> CourtlinkError {
    CourtlinkError::InternalError(message.to_string())
}
