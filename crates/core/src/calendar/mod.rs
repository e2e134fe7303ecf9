//! Booked-day calendars for listings.
//!
//! This module implements the per-listing reservation calendar:
//! - `dates` - Day keys and inclusive date-range expansion
//! - `index` - The copy-on-write set of booked days
//! - `error` - Calendar-specific error types

pub mod dates;
pub mod error;
pub mod index;

#[cfg(test)]
mod index_props;

pub use dates::{DayKey, day_span, nights};
pub use error::CalendarError;
pub use index::BookingCalendar;
