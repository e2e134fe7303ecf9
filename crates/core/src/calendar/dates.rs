//! Day keys and inclusive date-range expansion.
//!
//! Booking ranges are inclusive of both endpoints: a same-day
//! check-in/check-out stay is one night. All arithmetic is UTC-only, so
//! daylight-saving adjustments never apply.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Milliseconds in one UTC day.
const DAY_MS: i64 = 86_400_000;

/// A single calendar day as stored in a listing's booking calendar.
///
/// Months are zero-based (0 = January), matching the wire format of the
/// serialized calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    /// Calendar year.
    pub year: i32,
    /// Zero-based month (0 = January .. 11 = December).
    pub month: u32,
    /// Day of month (1..=31).
    pub day: u32,
}

impl DayKey {
    /// Builds a day key from a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
        }
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// Expands an inclusive check-in/check-out pair into its calendar days.
///
/// Walks one UTC day at a time from `check_in` through `check_out`
/// inclusive, stepping by a fixed 86,400,000 ms increment. The caller is
/// responsible for validating that `check_out` does not precede
/// `check_in`; an inverted range yields an empty sequence.
#[must_use]
pub fn day_span(check_in: NaiveDate, check_out: NaiveDate) -> Vec<DayKey> {
    let end = check_out.and_time(chrono::NaiveTime::MIN).and_utc();
    let mut cursor = check_in.and_time(chrono::NaiveTime::MIN).and_utc();
    let mut days = Vec::new();

    while cursor <= end {
        days.push(DayKey::from_date(cursor.date_naive()));
        cursor += TimeDelta::milliseconds(DAY_MS);
    }

    days
}

/// Inclusive day count of a stay: check-in and check-out both count.
#[must_use]
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days() + 1
}
