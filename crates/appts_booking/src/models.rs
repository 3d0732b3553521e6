// File: crates/appts_booking/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::calendar_day::CalendarDay;
use crate::context::Interrupted;
use crate::error::{HolidayError, StoreError, ValidationError};

pub const MAX_NAME_CHARS: usize = 50;

/// A validated request to book `day`.
///
/// Only obtainable through [`BookingRequest::new`], so every value in
/// circulation satisfies the name rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    first_name: String,
    last_name: String,
    day: CalendarDay,
}

impl BookingRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        day: CalendarDay,
    ) -> Result<Self, ValidationError> {
        let first_name = validate_name("firstName", first_name.into())?;
        let last_name = validate_name("lastName", last_name.into())?;
        Ok(Self {
            first_name,
            last_name,
            day,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn day(&self) -> CalendarDay {
        self.day
    }

    pub fn into_parts(self) -> (String, String, CalendarDay) {
        (self.first_name, self.last_name, self.day)
    }
}

fn validate_name(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank(field));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// A booked day, as persisted by an [`crate::AppointmentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub day: CalendarDay,
}

/// Result of one `BookingService::create` call.
#[derive(Debug)]
pub enum BookingOutcome {
    Booked(Appointment),
    RejectedPast,
    RejectedHoliday,
    RejectedConflict,
    Failed(BookingFailure),
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked(_))
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            BookingOutcome::Booked(_) => "booked",
            BookingOutcome::RejectedPast => "rejected_past",
            BookingOutcome::RejectedHoliday => "rejected_holiday",
            BookingOutcome::RejectedConflict => "rejected_conflict",
            BookingOutcome::Failed(_) => "failed",
        }
    }
}

/// The dependency a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    HolidayOracle,
    Store,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::HolidayOracle => write!(f, "holiday oracle"),
            Dependency::Store => write!(f, "appointment store"),
        }
    }
}

/// Why a booking could not be completed.
#[derive(Error, Debug)]
pub enum BookingFailure {
    #[error("holiday oracle failed: {0}")]
    HolidayOracle(#[source] HolidayError),
    #[error("appointment store failed: {0}")]
    Store(#[source] StoreError),
    #[error("booking interrupted: {0}")]
    Interrupted(#[from] Interrupted),
    #[error("unexpected booking failure: {0}")]
    Unexpected(String),
}

impl BookingFailure {
    pub fn dependency(&self) -> Option<Dependency> {
        match self {
            BookingFailure::HolidayOracle(_) => Some(Dependency::HolidayOracle),
            BookingFailure::Store(_) => Some(Dependency::Store),
            BookingFailure::Interrupted(_) | BookingFailure::Unexpected(_) => None,
        }
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(
            self,
            BookingFailure::Interrupted(Interrupted::DeadlineExceeded)
        )
    }
}
