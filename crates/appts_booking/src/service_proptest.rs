#[cfg(test)]
mod tests {
    use crate::calendar_day::CalendarDay;
    use crate::clock::FixedClock;
    use crate::context::RequestContext;
    use crate::holidays::mock::ScriptedHolidayOracle;
    use crate::models::{BookingOutcome, BookingRequest};
    use crate::service::BookingService;
    use crate::store::mock::{Script, ScriptedStore};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use std::sync::Arc;

    struct Attempt {
        outcome: BookingOutcome,
        oracle_calls: usize,
        store_inserts: usize,
    }

    // Books `now`'s day shifted by `offset_days`, with the clock at `secs` past 2025-01-01
    fn attempt(offset_days: i64, secs: i64) -> Attempt {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let now = Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap())
            + Duration::seconds(secs);
        let target = CalendarDay::from(now.date_naive() + Duration::days(offset_days));

        let oracle = Arc::new(ScriptedHolidayOracle::with_holidays([]));
        let store = Arc::new(ScriptedStore::new(Script::Store));
        let service = BookingService::new(Arc::new(FixedClock(now)), oracle.clone(), store.clone());
        let request = BookingRequest::new("Ada", "Lovelace", target).unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let outcome = runtime.block_on(service.create(&RequestContext::new(), request));

        Attempt {
            outcome,
            oracle_calls: oracle.calls(),
            store_inserts: store.inserts(),
        }
    }

    proptest! {
        // Any earlier day is rejected before a dependency is asked, whatever the time of day
        #[test]
        fn test_earlier_days_are_rejected_without_lookups(
            offset in -400i64..0,
            secs in 0i64..86_400,
        ) {
            let result = attempt(offset, secs);
            prop_assert!(matches!(result.outcome, BookingOutcome::RejectedPast));
            prop_assert_eq!(result.oracle_calls, 0);
            prop_assert_eq!(result.store_inserts, 0);
        }

        // Today and later days go on to the holiday check and the store
        #[test]
        fn test_today_and_later_pass_the_past_check(
            offset in 0i64..400,
            secs in 0i64..86_400,
        ) {
            let result = attempt(offset, secs);
            prop_assert!(result.outcome.is_booked());
            prop_assert_eq!(result.oracle_calls, 1);
            prop_assert_eq!(result.store_inserts, 1);
        }
    }
}
