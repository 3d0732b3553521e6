// File: crates/appts_booking/src/doc.rs
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::calendar_day::CalendarDay;
use crate::handlers::{AppointmentPayload, AppointmentResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_appointment_handler,
        crate::handlers::get_appointment_handler
    ),
    components(
        schemas(AppointmentPayload, AppointmentResponse, CalendarDay)
    ),
    tags(
        (name = "Appointments", description = "Daily appointment booking API")
    ),
    servers(
        (url = "/api", description = "Appointment API server")
    )
)]
pub struct BookingApiDoc;
