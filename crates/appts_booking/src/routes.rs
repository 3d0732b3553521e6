// --- File: crates/appts_booking/src/routes.rs ---
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};

use appts_config::ServerConfig;

use crate::handlers::{create_appointment_handler, get_appointment_handler, BookingState};
use crate::service::BookingService;

/// Creates a router containing the appointment routes.
///
/// Paths are relative; the backend nests them under `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/appts", post(create_appointment_handler))
        .route("/appts/", post(create_appointment_handler))
        .route("/appts/{date}", get(get_appointment_handler))
        .with_state(state)
}

/// Builds the route state from the server settings.
pub fn booking_state(service: Arc<BookingService>, server: &ServerConfig) -> Arc<BookingState> {
    Arc::new(BookingState {
        service,
        request_timeout: Duration::from_secs(server.request_timeout_secs),
    })
}
