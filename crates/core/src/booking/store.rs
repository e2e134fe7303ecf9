//! Document-store trait for the booking pipeline.
//!
//! Each method is one independently atomic single-document operation;
//! there is no cross-document transaction primitive. The trait is
//! implemented by the db crate; tests use recording fakes.

use thiserror::Error;

use roost_shared::types::{BookingId, ListingId, Money, PageRequest, UserId};

use super::types::{Booking, Listing, ListingsPage, ListingsSort, User};
use crate::calendar::BookingCalendar;

/// Errors raised by document-store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A conditional update found a different document version than the
    /// caller read.
    #[error("calendar version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        /// The version the caller read.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// The targeted document does not exist.
    #[error("document not found")]
    NotFound,

    /// The backing store failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Store trait for booking persistence.
pub trait BookingStore: Send + Sync {
    /// Fetches a listing by id.
    fn find_listing(
        &self,
        id: ListingId,
    ) -> impl std::future::Future<Output = Result<Option<Listing>, StoreError>> + Send;

    /// Fetches a user by id.
    fn find_user(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Resolves a session token to its user, if any.
    fn find_user_by_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Inserts a new booking document.
    fn insert_booking(
        &self,
        booking: Booking,
    ) -> impl std::future::Future<Output = Result<Booking, StoreError>> + Send;

    /// Increments a host's accumulated income.
    fn add_income(
        &self,
        user: UserId,
        amount: Money,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Appends a booking to a tenant's booking list.
    fn push_tenant_booking(
        &self,
        user: UserId,
        booking: BookingId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Replaces a listing's calendar and appends the booking, on the
    /// condition that the stored `calendar_version` still equals
    /// `expected_version`. The stored version is bumped on success.
    fn commit_listing_booking(
        &self,
        listing: ListingId,
        expected_version: u64,
        calendar: BookingCalendar,
        booking: BookingId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Browses listings with optional price sorting.
    fn list_listings(
        &self,
        sort: Option<ListingsSort>,
        page: PageRequest,
    ) -> impl std::future::Future<Output = Result<ListingsPage, StoreError>> + Send;

    /// Fetches the bookings with the given ids, preserving order.
    fn find_bookings(
        &self,
        ids: &[BookingId],
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, StoreError>> + Send;
}
