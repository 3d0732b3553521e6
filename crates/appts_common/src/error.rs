use std::fmt;
use thiserror::Error;

/// The error type surfaced at the HTTP boundary.
///
/// Domain crates keep their own error enums and translate into `AppError`
/// only when a response has to be produced.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body or path could not be parsed
    #[error("{0}")]
    ParseError(String),

    /// The request was well-formed but violates a business rule
    #[error("{0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested resource is already taken
    #[error("{0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("{0}")]
    NotFoundError(String),

    /// The request ran out of time
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// The backing store is not reachable
    #[error("Service unavailable: {0}")]
    UnavailableError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AppError {
    fn status_code(&self) -> u16 {
        match self {
            AppError::ParseError(_) => 400,
            AppError::ValidationError(_) => 400,
            AppError::DatabaseError(_) => 500,
            AppError::ExternalServiceError { .. } => 500,
            AppError::ConflictError(_) => 409,
            AppError::NotFoundError(_) => 404,
            AppError::TimeoutError(_) => 504,
            AppError::UnavailableError(_) => 503,
            AppError::InternalError(_) => 500,
        }
    }
}

impl AppError {
    /// The message a client is allowed to see.
    ///
    /// Client errors echo their message; server-side failures collapse to a
    /// fixed text so that causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ParseError(_)
            | AppError::ValidationError(_)
            | AppError::ConflictError(_)
            | AppError::NotFoundError(_) => self.to_string(),
            AppError::TimeoutError(_) => "request timed out".to_string(),
            AppError::UnavailableError(_) => "service unavailable".to_string(),
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError { .. }
            | AppError::InternalError(_) => "internal server error".to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> AppError {
    AppError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AppError {
    AppError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> AppError {
    AppError::ConflictError(message.to_string())
}

pub fn timeout<T: fmt::Display>(message: T) -> AppError {
    AppError::TimeoutError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> AppError {
    AppError::InternalError(message.to_string())
}
