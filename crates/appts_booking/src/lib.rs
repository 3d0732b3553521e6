// --- File: crates/appts_booking/src/lib.rs ---
// Declare modules within this crate
pub mod calendar_day;
#[cfg(test)]
mod calendar_day_proptest;
pub mod clock;
pub mod context;
#[cfg(test)]
mod context_test;
pub mod doc;
pub mod error;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod holidays;
pub mod models;
pub mod routes;
pub mod service;
#[cfg(test)]
mod service_proptest;
pub mod store;

pub use calendar_day::CalendarDay;
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{Interrupted, RequestContext};
pub use error::{HolidayError, StoreError, ValidationError};
pub use holidays::{CachingHolidayOracle, HolidayOracle};
pub use models::{Appointment, BookingFailure, BookingOutcome, BookingRequest, Dependency};
pub use service::BookingService;
pub use store::{AppointmentStore, InMemoryAppointmentStore};
