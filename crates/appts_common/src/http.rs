// --- File: crates/appts_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{AppError, HttpStatusCode};

// Include the client module
pub mod client;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code
    pub code: u16,
    /// Canonical reason phrase of the status code
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub status: String,
    /// Application-level error message
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub error: String,
}

impl ErrorBody {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status_code.as_u16(),
            status: status_code.canonical_reason().unwrap_or_default().to_string(),
            error: message.into(),
        }
    }
}

/// Implement IntoResponse for AppError to make it easier to use in Axum handlers.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("request failed: {}", self);
        }

        (status_code, Json(ErrorBody::new(status_code, self.public_message()))).into_response()
    }
}
