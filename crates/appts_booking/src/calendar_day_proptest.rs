#[cfg(test)]
mod tests {
    use crate::calendar_day::CalendarDay;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    // Days between 2000-01-01 and roughly 2100
    fn day_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..36_500).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset)
        })
    }

    proptest! {
        // Equality ignores the time of day of the source instant
        #[test]
        fn test_same_date_any_time_is_equal(
            date in day_strategy(),
            secs_a in 0u32..86_400,
            secs_b in 0u32..86_400,
        ) {
            let a = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
                + Duration::seconds(secs_a as i64);
            let b = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
                + Duration::seconds(secs_b as i64);

            prop_assert_eq!(CalendarDay::from_instant(a), CalendarDay::from_instant(b));
            prop_assert!(!CalendarDay::from_instant(a).is_before(&CalendarDay::from_instant(b)));
        }

        // is_before agrees with date ordering and is strict
        #[test]
        fn test_is_before_matches_date_order(a in day_strategy(), b in day_strategy()) {
            let (da, db) = (CalendarDay::from(a), CalendarDay::from(b));
            prop_assert_eq!(da.is_before(&db), a < b);
            prop_assert!(!(da.is_before(&db) && db.is_before(&da)));
            prop_assert!(!da.is_before(&da));
        }

        // Display output parses back to the same day
        #[test]
        fn test_display_parses_back(date in day_strategy()) {
            let day = CalendarDay::from(date);
            prop_assert_eq!(CalendarDay::parse(&day.to_string()).unwrap(), day);
        }
    }
}
