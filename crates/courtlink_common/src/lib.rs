// --- File: crates/courtlink_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod http;     // Shared HTTP client
pub mod logging;  // Logging utilities
pub mod models;   // Shared data models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error,
    internal_error,
    not_found,
    upstream_error,
    validation_error,
    Context,
    CourtlinkError,
    HttpStatusCode,
};

// Re-export the shared HTTP client
pub use http::{create_client, HTTP_CLIENT};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};
