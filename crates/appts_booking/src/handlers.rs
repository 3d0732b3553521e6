// File: crates/appts_booking/src/handlers.rs
use std::sync::Arc;
use std::time::Duration;

use appts_common::{conflict, not_found, timeout, validation_error, AppError};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calendar_day::CalendarDay;
use crate::context::RequestContext;
use crate::error::ValidationError;
use crate::models::{Appointment, BookingFailure, BookingOutcome, BookingRequest, Dependency};
use crate::service::BookingService;

pub const PAST_DAY_MESSAGE: &str = "cannot book appointment in the past";
pub const HOLIDAY_MESSAGE: &str = "cannot book appointment on public holiday";
pub const CONFLICT_MESSAGE: &str = "appointment date already taken";

// Shared state of the booking routes
#[derive(Clone)]
pub struct BookingState {
    pub service: Arc<BookingService>,
    /// Deadline given to every request's `RequestContext`.
    pub request_timeout: Duration,
}

/// Body of `POST /appts`.
///
/// Every field is optional at the JSON level so that a missing field turns
/// into a validation message instead of a generic deserialization error.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    #[cfg_attr(feature = "openapi", schema(example = "Ada", max_length = 50))]
    pub first_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Lovelace", max_length = 50))]
    pub last_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-07-04", format = Date))]
    pub visit_date: Option<String>,
}

impl AppointmentPayload {
    pub fn into_request(self) -> Result<BookingRequest, ValidationError> {
        let first_name = self.first_name.ok_or(ValidationError::Missing("firstName"))?;
        let last_name = self.last_name.ok_or(ValidationError::Missing("lastName"))?;
        let visit_date = self.visit_date.ok_or(ValidationError::Missing("visitDate"))?;
        let day = CalendarDay::parse(&visit_date)?;
        BookingRequest::new(first_name, last_name, day)
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub visit_date: CalendarDay,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            first_name: appointment.first_name,
            last_name: appointment.last_name,
            visit_date: appointment.day,
        }
    }
}

fn failure_to_app_error(failure: BookingFailure) -> AppError {
    if failure.is_deadline_exceeded() {
        return timeout(failure);
    }
    match failure.dependency() {
        Some(Dependency::HolidayOracle) => AppError::ExternalServiceError {
            service_name: Dependency::HolidayOracle.to_string(),
            message: failure.to_string(),
        },
        Some(Dependency::Store) => AppError::DatabaseError(failure.to_string()),
        None => AppError::InternalError(failure.to_string()),
    }
}

/// Handler to book the day given in the body.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/appts",
    request_body = AppointmentPayload,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentResponse),
        (status = 400, description = "Invalid request, day in the past or public holiday"),
        (status = 409, description = "Day already taken"),
        (status = 500, description = "A dependency failed"),
        (status = 504, description = "Request deadline exceeded")
    ),
    tag = "Appointments"
))]
pub async fn create_appointment_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<AppointmentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::ParseError(rejection.body_text()))?;
    let request = payload.into_request().map_err(validation_error)?;

    let ctx = RequestContext::with_timeout(state.request_timeout);
    let outcome = state.service.create(&ctx, request).await;
    info!(outcome = outcome.label(), "booking request handled");
    match outcome {
        BookingOutcome::Booked(appointment) => {
            Ok((StatusCode::CREATED, Json(appointment.into())))
        }
        BookingOutcome::RejectedPast => Err(validation_error(PAST_DAY_MESSAGE)),
        BookingOutcome::RejectedHoliday => Err(validation_error(HOLIDAY_MESSAGE)),
        BookingOutcome::RejectedConflict => Err(conflict(CONFLICT_MESSAGE)),
        BookingOutcome::Failed(failure) => Err(failure_to_app_error(failure)),
    }
}

/// Handler to look up the appointment booked on a day.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/appts/{date}",
    params(
        ("date" = String, Path, description = "Day in YYYY-MM-DD format", example = "2025-07-04", format = Date)
    ),
    responses(
        (status = 200, description = "Appointment on that day", body = AppointmentResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Day is free")
    ),
    tag = "Appointments"
))]
pub async fn get_appointment_handler(
    State(state): State<Arc<BookingState>>,
    Path(date): Path<String>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let day = CalendarDay::parse(&date).map_err(validation_error)?;

    let ctx = RequestContext::with_timeout(state.request_timeout);
    match state.service.find(&ctx, day).await {
        Ok(Some(appointment)) => Ok(Json(appointment.into())),
        Ok(None) => {
            info!(%day, "no appointment booked");
            Err(not_found(format!("no appointment on {day}")))
        }
        Err(failure) => Err(failure_to_app_error(failure)),
    }
}
