//! Property-based tests for date-range expansion and calendar updates.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::dates::{DayKey, day_span, nights};
use super::index::BookingCalendar;

/// Strategy for an arbitrary check-in date.
fn check_in_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for a stay length in days beyond check-in.
fn stay_days() -> impl Strategy<Value = i64> {
    0i64..90
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The span of a valid range has exactly `(check_out - check_in) + 1`
    /// entries, strictly ascending, with no duplicates.
    #[test]
    fn prop_span_length_and_order(check_in in check_in_date(), extra in stay_days()) {
        let check_out = check_in + chrono::TimeDelta::days(extra);

        let days = day_span(check_in, check_out);

        prop_assert_eq!(days.len() as i64, extra + 1);
        prop_assert_eq!(days.len() as i64, nights(check_in, check_out));
        prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(days.first().copied(), Some(DayKey::from_date(check_in)));
        prop_assert_eq!(days.last().copied(), Some(DayKey::from_date(check_out)));
    }

    /// Applying a conflict-free span yields a calendar containing exactly
    /// the old days plus the span, and never touches the receiver.
    #[test]
    fn prop_with_days_is_disjoint_union(check_in in check_in_date(), extra in stay_days()) {
        let check_out = check_in + chrono::TimeDelta::days(extra);
        let days = day_span(check_in, check_out);

        let base = BookingCalendar::new();
        let updated = base.with_days(&days).unwrap();

        prop_assert!(base.is_empty());
        prop_assert_eq!(updated.len(), days.len());
        prop_assert!(days.iter().all(|d| updated.contains(*d)));
    }

    /// Two independent copies of the same starting calendar produce
    /// identical results for the same non-conflicting range.
    #[test]
    fn prop_with_days_is_deterministic(check_in in check_in_date(), extra in stay_days()) {
        let check_out = check_in + chrono::TimeDelta::days(extra);
        let days = day_span(check_in, check_out);

        let base = BookingCalendar::new();
        let first = base.clone().with_days(&days).unwrap();
        let second = base.with_days(&days).unwrap();

        prop_assert_eq!(first, second);
    }

    /// Any day of the span already present in the calendar makes the
    /// whole update fail, leaving the receiver unchanged.
    #[test]
    fn prop_overlap_always_conflicts(
        check_in in check_in_date(),
        extra in stay_days(),
        pick in 0usize..90,
    ) {
        let check_out = check_in + chrono::TimeDelta::days(extra);
        let days = day_span(check_in, check_out);
        let taken = days[pick % days.len()];

        let calendar: BookingCalendar = [taken].into_iter().collect();
        let before = calendar.clone();

        let result = calendar.with_days(&days);

        prop_assert!(result.is_err());
        prop_assert_eq!(calendar, before);
    }
}
