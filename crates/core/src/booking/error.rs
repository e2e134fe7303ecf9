//! Booking error types.
//!
//! Every failure of the booking-creation pipeline keeps its kind all the
//! way to the HTTP boundary; nothing is flattened into a catch-all
//! wrapper. Internal component errors (`CalendarError`, `PaymentError`,
//! `StoreError`) convert into the matching variant here.

use chrono::NaiveDate;
use thiserror::Error;

use roost_shared::types::{ListingId, UserId};

use super::store::StoreError;
use crate::calendar::CalendarError;
use crate::payment::PaymentError;

/// Errors that can occur while creating a booking.
#[derive(Debug, Error)]
pub enum BookingError {
    /// No viewer identity could be resolved from the request.
    #[error("viewer cannot be found")]
    Unauthenticated,

    /// The targeted listing does not exist.
    #[error("listing cannot be found: {0}")]
    ListingNotFound(ListingId),

    /// A host attempted to book their own listing.
    #[error("viewer cannot book their own listing")]
    SelfBookingForbidden,

    /// Check-out precedes check-in.
    #[error("check out date ({check_out}) cannot be before check in date ({check_in})")]
    InvalidDateRange {
        /// Requested check-in day.
        check_in: NaiveDate,
        /// Requested check-out day.
        check_out: NaiveDate,
    },

    /// The requested range overlaps an existing booking.
    #[error(transparent)]
    DateConflict(#[from] CalendarError),

    /// The host is missing or has no connected payment account.
    #[error("host {0} cannot be found or is not connected with a payment account")]
    HostNotPayable(UserId),

    /// The payment gateway refused or failed the charge.
    #[error("failed to charge the payment source: {0}")]
    PaymentFailed(#[from] PaymentError),

    /// Another booking committed against the same listing between the
    /// calendar snapshot and the final write.
    #[error("listing was booked concurrently, please retry")]
    ConcurrentModification,

    /// The document store failed.
    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { .. } => Self::ConcurrentModification,
            StoreError::NotFound | StoreError::Backend(_) => Self::Store(err.to_string()),
        }
    }
}

impl BookingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::ListingNotFound(_) => "LISTING_NOT_FOUND",
            Self::SelfBookingForbidden => "SELF_BOOKING_FORBIDDEN",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::DateConflict(_) => "DATE_CONFLICT",
            Self::HostNotPayable(_) => "HOST_NOT_PAYABLE",
            Self::PaymentFailed(_) => "PAYMENT_FAILED",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::SelfBookingForbidden => 403,
            Self::ListingNotFound(_) => 404,
            Self::InvalidDateRange { .. } => 400,
            Self::DateConflict(_) | Self::ConcurrentModification => 409,
            Self::HostNotPayable(_) => 422,
            Self::PaymentFailed(_) => 502,
            Self::Store(_) => 500,
        }
    }

    /// Returns true if the caller may retry the same request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}
