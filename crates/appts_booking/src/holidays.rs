// File: crates/appts_booking/src/holidays.rs
use std::sync::Arc;

use appts_common::BoxFuture;
use moka::future::Cache;
use tracing::debug;

use crate::calendar_day::CalendarDay;
use crate::context::RequestContext;
use crate::error::HolidayError;

/// Answers whether a day is a public holiday in one region.
///
/// Lookups are pure queries and may be repeated for the same day.
pub trait HolidayOracle: Send + Sync {
    /// Region code the answers apply to, e.g. `GB`.
    fn region(&self) -> &str;

    fn is_holiday<'a>(
        &'a self,
        ctx: &'a RequestContext,
        day: CalendarDay,
    ) -> BoxFuture<'a, bool, HolidayError>;
}

/// Remembers answers of another oracle for the lifetime of the process.
///
/// Entries are keyed by `(day, region)` and never expire; only the
/// capacity bounds the cache. Concurrent misses for one key share a single
/// lookup. Failed lookups are not cached.
pub struct CachingHolidayOracle {
    inner: Arc<dyn HolidayOracle>,
    cache: Cache<(CalendarDay, String), bool>,
}

impl CachingHolidayOracle {
    pub fn new(inner: Arc<dyn HolidayOracle>, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }
}

impl HolidayOracle for CachingHolidayOracle {
    fn region(&self) -> &str {
        self.inner.region()
    }

    fn is_holiday<'a>(
        &'a self,
        ctx: &'a RequestContext,
        day: CalendarDay,
    ) -> BoxFuture<'a, bool, HolidayError> {
        Box::pin(async move {
            let key = (day, self.inner.region().to_string());
            let entry = self
                .cache
                .entry(key)
                .or_try_insert_with(self.inner.is_holiday(ctx, day))
                .await;

            match entry {
                Ok(entry) => {
                    if !entry.is_fresh() {
                        debug!(%day, holiday = entry.value(), "holiday cache hit");
                    }
                    Ok(entry.into_value())
                }
                // The shared lookup ran under another request's context, which ended first
                Err(shared)
                    if matches!(*shared, HolidayError::Interrupted) && ctx.check().is_ok() =>
                {
                    debug!(%day, "shared holiday lookup interrupted, looking up again");
                    self.inner.is_holiday(ctx, day).await
                }
                Err(shared) => Err((*shared).clone()),
            }
        })
    }
}
