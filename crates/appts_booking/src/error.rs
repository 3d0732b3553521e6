// File: crates/appts_booking/src/error.rs
use std::sync::Arc;

use appts_common::BoxedError;
use thiserror::Error;

use crate::calendar_day::CalendarDay;

/// A booking request that could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Failures reported by an [`crate::AppointmentStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another appointment already occupies the day.
    #[error("an appointment already exists on {0}")]
    Conflict(CalendarDay),
    /// The request context ended before the write committed; nothing was stored.
    #[error("store operation interrupted before commit")]
    Interrupted,
    #[error("appointment store failure: {0}")]
    Backend(#[source] BoxedError),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(BoxedError::new(err))
    }
}

/// Failures reported by a [`crate::HolidayOracle`].
///
/// Cheap to clone so that one failed lookup can be handed to every caller
/// that waited on it.
#[derive(Error, Debug, Clone)]
pub enum HolidayError {
    #[error("holiday lookup interrupted")]
    Interrupted,
    #[error("holiday lookup for region {region} failed: {source}")]
    Lookup {
        region: String,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl HolidayError {
    pub fn lookup<E>(region: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HolidayError::Lookup {
            region: region.into(),
            source: Arc::new(err),
        }
    }
}
