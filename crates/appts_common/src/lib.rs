// --- File: crates/appts_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    conflict, internal_error, not_found, timeout, validation_error, AppError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, ErrorBody};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_config, init_with_level, log_result, LogGuard};

pub use services::{BoxFuture, BoxedError};
