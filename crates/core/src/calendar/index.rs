//! The per-listing calendar of booked days.
//!
//! Internally the calendar is an ordered set of canonical day keys; the
//! wire format is the nested `{year: {month: {day: true}}}` object the
//! public API exposes. A day key is present iff that UTC day is already
//! reserved by some booking of the listing; no entry means "free".

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::dates::DayKey;
use super::error::CalendarError;

/// Nested year -> month -> day serialization shape.
type NestedDays = BTreeMap<i32, BTreeMap<u32, BTreeMap<u32, bool>>>;

/// The set of booked days for one listing.
///
/// Updates are copy-on-write: `with_days` builds a new calendar and never
/// mutates the receiver, so a failed update leaves the caller's value
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NestedDays", into = "NestedDays")]
pub struct BookingCalendar {
    days: BTreeSet<DayKey>,
}

impl BookingCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no day is booked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of booked days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the given day is already booked.
    #[must_use]
    pub fn contains(&self, day: DayKey) -> bool {
        self.days.contains(&day)
    }

    /// Returns a new calendar with every day in `days` marked booked.
    ///
    /// Fails with `CalendarError::DateConflict` on the first day that is
    /// already present. The operation is atomic: on failure no partially
    /// updated calendar escapes, and the receiver is never modified. An
    /// empty `days` sequence returns an equal calendar.
    pub fn with_days(&self, days: &[DayKey]) -> Result<Self, CalendarError> {
        let mut updated = self.days.clone();

        for day in days {
            if !updated.insert(*day) {
                return Err(CalendarError::DateConflict(*day));
            }
        }

        Ok(Self { days: updated })
    }

    /// Iterates the booked days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.days.iter().copied()
    }
}

impl FromIterator<DayKey> for BookingCalendar {
    fn from_iter<I: IntoIterator<Item = DayKey>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl From<NestedDays> for BookingCalendar {
    fn from(nested: NestedDays) -> Self {
        let mut days = BTreeSet::new();
        for (year, months) in nested {
            for (month, month_days) in months {
                for (day, booked) in month_days {
                    if booked {
                        days.insert(DayKey { year, month, day });
                    }
                }
            }
        }
        Self { days }
    }
}

impl From<BookingCalendar> for NestedDays {
    fn from(calendar: BookingCalendar) -> Self {
        let mut nested = NestedDays::new();
        for key in calendar.days {
            nested
                .entry(key.year)
                .or_default()
                .entry(key.month)
                .or_default()
                .insert(key.day, true);
        }
        nested
    }
}
