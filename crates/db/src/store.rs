//! The concurrent in-memory document store.

use dashmap::DashMap;

use roost_core::booking::store::{BookingStore, StoreError};
use roost_core::booking::types::{Booking, Listing, ListingsPage, ListingsSort, User};
use roost_core::calendar::BookingCalendar;
use roost_shared::types::{BookingId, ListingId, Money, PageRequest, UserId};

/// Concurrent in-memory document store.
///
/// Each collection is a `DashMap`; mutations take the entry lock for the
/// targeted document only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: DashMap<ListingId, Listing>,
    users: DashMap<UserId, User>,
    bookings: DashMap<BookingId, Booking>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a listing document.
    pub fn upsert_listing(&self, listing: Listing) {
        self.listings.insert(listing.id, listing);
    }

    /// Inserts or replaces a user document.
    pub fn upsert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Number of listing documents.
    #[must_use]
    pub fn listing_count(&self) -> usize {
        self.listings.len()
    }

    /// Number of user documents.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl BookingStore for MemoryStore {
    async fn find_listing(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        Ok(self.listings.get(&id).map(|doc| doc.value().clone()))
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|doc| doc.value().clone()))
    }

    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self
            .users
            .iter()
            .find(|doc| doc.token == token)
            .map(|doc| doc.value().clone()))
    }

    async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError> {
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn add_income(&self, user: UserId, amount: Money) -> Result<(), StoreError> {
        let mut doc = self.users.get_mut(&user).ok_or(StoreError::NotFound)?;
        doc.income = Money::new(
            doc.income.minor.saturating_add(amount.minor),
            doc.income.currency,
        );
        Ok(())
    }

    async fn push_tenant_booking(
        &self,
        user: UserId,
        booking: BookingId,
    ) -> Result<(), StoreError> {
        let mut doc = self.users.get_mut(&user).ok_or(StoreError::NotFound)?;
        doc.bookings.push(booking);
        Ok(())
    }

    async fn commit_listing_booking(
        &self,
        listing: ListingId,
        expected_version: u64,
        calendar: BookingCalendar,
        booking: BookingId,
    ) -> Result<(), StoreError> {
        let mut doc = self.listings.get_mut(&listing).ok_or(StoreError::NotFound)?;
        if doc.calendar_version != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: doc.calendar_version,
            });
        }
        doc.calendar = calendar;
        doc.calendar_version += 1;
        doc.bookings.push(booking);
        Ok(())
    }

    async fn list_listings(
        &self,
        sort: Option<ListingsSort>,
        page: PageRequest,
    ) -> Result<ListingsPage, StoreError> {
        let mut all: Vec<Listing> = self.listings.iter().map(|doc| doc.value().clone()).collect();

        match sort {
            Some(ListingsSort::PriceLowToHigh) => all.sort_by_key(|l| l.price.minor),
            Some(ListingsSort::PriceHighToLow) => {
                all.sort_by_key(|l| std::cmp::Reverse(l.price.minor));
            }
            None => all.sort_by_key(|l| l.id.into_inner()),
        }

        let page = page.clamped();
        let total = all.len() as u64;
        let result: Vec<Listing> = all
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();

        Ok(ListingsPage { total, result })
    }

    async fn find_bookings(&self, ids: &[BookingId]) -> Result<Vec<Booking>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.bookings.get(id).map(|doc| doc.value().clone()))
            .collect())
    }
}
