// File: crates/appts_booking/src/service.rs
//! The booking pipeline.
//!
//! `create` runs, in this order and stopping at the first rejection:
//! past-day check, holiday lookup, store insert. The store is the only
//! arbiter of the one-appointment-per-day rule; the service keeps no mutable
//! state of its own and never retries a dependency.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::calendar_day::CalendarDay;
use crate::clock::Clock;
use crate::context::{Interrupted, RequestContext};
use crate::error::{HolidayError, StoreError};
use crate::holidays::HolidayOracle;
use crate::models::{Appointment, BookingFailure, BookingOutcome, BookingRequest};
use crate::store::AppointmentStore;

#[derive(Clone)]
pub struct BookingService {
    clock: Arc<dyn Clock>,
    oracle: Arc<dyn HolidayOracle>,
    store: Arc<dyn AppointmentStore>,
}

impl BookingService {
    pub fn new(
        clock: Arc<dyn Clock>,
        oracle: Arc<dyn HolidayOracle>,
        store: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self {
            clock,
            oracle,
            store,
        }
    }

    /// Tries to book `request.day()`.
    ///
    /// Makes at most one insert attempt, and only after the day passed both
    /// the past-day and the holiday check.
    pub async fn create(&self, ctx: &RequestContext, request: BookingRequest) -> BookingOutcome {
        let (first_name, last_name, day) = request.into_parts();

        let today = CalendarDay::from_instant(self.clock.now());
        if day.is_before(&today) {
            info!(%day, %today, "booking rejected: day in the past");
            return BookingOutcome::RejectedPast;
        }

        match ctx.run(self.oracle.is_holiday(ctx, day)).await {
            Ok(Ok(false)) => {}
            Ok(Ok(true)) => {
                info!(%day, region = self.oracle.region(), "booking rejected: public holiday");
                return BookingOutcome::RejectedHoliday;
            }
            Ok(Err(HolidayError::Interrupted)) => {
                return interrupted(ctx, "holiday lookup");
            }
            Ok(Err(err)) => {
                warn!(%day, error = %err, "holiday lookup failed");
                return BookingOutcome::Failed(BookingFailure::HolidayOracle(err));
            }
            Err(cause) => {
                warn!(%day, %cause, "booking interrupted during holiday lookup");
                return BookingOutcome::Failed(BookingFailure::Interrupted(cause));
            }
        }

        // Last chance to stop without touching the store
        if let Err(cause) = ctx.check() {
            warn!(%day, %cause, "booking interrupted before store insert");
            return BookingOutcome::Failed(BookingFailure::Interrupted(cause));
        }

        match self.store.insert(ctx, &first_name, &last_name, day).await {
            Ok(appointment) if appointment.day != day => {
                error!(
                    requested = %day,
                    stored = %appointment.day,
                    id = appointment.id,
                    "store returned an appointment for a different day"
                );
                BookingOutcome::Failed(BookingFailure::Unexpected(format!(
                    "store booked {} for requested day {}",
                    appointment.day, day
                )))
            }
            Ok(appointment) => {
                info!(%day, id = appointment.id, "appointment booked");
                BookingOutcome::Booked(appointment)
            }
            Err(StoreError::Conflict(_)) => {
                info!(%day, "booking rejected: day already taken");
                BookingOutcome::RejectedConflict
            }
            Err(StoreError::Interrupted) => interrupted(ctx, "store insert"),
            Err(err) => {
                error!(%day, error = %err, "appointment store failed");
                BookingOutcome::Failed(BookingFailure::Store(err))
            }
        }
    }

    /// Read path: the committed appointment for `day`, if any.
    pub async fn find(
        &self,
        ctx: &RequestContext,
        day: CalendarDay,
    ) -> Result<Option<Appointment>, BookingFailure> {
        match ctx.run(self.store.find_by_day(ctx, day)).await {
            Ok(Ok(found)) => Ok(found),
            Ok(Err(StoreError::Interrupted)) => Err(BookingFailure::Interrupted(cause_of(ctx))),
            Ok(Err(err)) => Err(BookingFailure::Store(err)),
            Err(cause) => Err(BookingFailure::Interrupted(cause)),
        }
    }
}

fn cause_of(ctx: &RequestContext) -> Interrupted {
    ctx.check().err().unwrap_or(Interrupted::Cancelled)
}

fn interrupted(ctx: &RequestContext, stage: &str) -> BookingOutcome {
    let cause = cause_of(ctx);
    warn!(%cause, stage, "booking interrupted");
    BookingOutcome::Failed(BookingFailure::Interrupted(cause))
}
