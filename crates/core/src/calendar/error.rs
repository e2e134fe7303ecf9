//! Calendar error types.

use thiserror::Error;

use super::dates::DayKey;

/// Errors raised by booking-calendar operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The requested range overlaps a day that is already booked.
    #[error("selected dates overlap a date that has already been booked: {0}")]
    DateConflict(DayKey),
}

impl CalendarError {
    /// Returns the first conflicting day.
    #[must_use]
    pub const fn day(&self) -> DayKey {
        match self {
            Self::DateConflict(day) => *day,
        }
    }
}
