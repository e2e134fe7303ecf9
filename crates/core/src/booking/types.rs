//! Booking domain documents.
//!
//! These are the documents the store persists: listings, users, and the
//! bookings connecting them. All money amounts are integer minor units.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use roost_shared::types::{BookingId, ListingId, Money, UserId};

use crate::calendar::BookingCalendar;

/// The kind of property a listing offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingType {
    /// A self-contained unit within a larger building.
    Apartment,
    /// A whole house.
    House,
}

/// A rentable property owned by exactly one host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier.
    pub id: ListingId,
    /// The host who owns this listing.
    pub host: UserId,
    /// Short title shown in search results.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Cover image URL.
    pub image: String,
    /// Property kind.
    pub listing_type: ListingType,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Administrative region (state, province).
    pub admin: String,
    /// Country.
    pub country: String,
    /// Nightly price in minor currency units.
    pub price: Money,
    /// Maximum number of guests.
    pub num_of_guests: u32,
    /// Days already reserved by existing bookings.
    pub calendar: BookingCalendar,
    /// Version counter guarding concurrent calendar updates.
    pub calendar_version: u64,
    /// Bookings made against this listing.
    pub bookings: Vec<BookingId>,
}

/// A marketplace user: tenant, host, or both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Opaque session credential.
    pub token: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Contact email.
    pub contact: String,
    /// Connected payment-account identifier, present once the user can
    /// receive payouts as a host.
    pub wallet_id: Option<String>,
    /// Accumulated host income in minor units.
    pub income: Money,
    /// Bookings this user made as a tenant.
    pub bookings: Vec<BookingId>,
    /// Listings this user hosts.
    pub listings: Vec<ListingId>,
}

impl User {
    /// The viewer identity this user resolves to.
    #[must_use]
    pub fn as_viewer(&self) -> Viewer {
        Viewer {
            id: self.id,
            wallet_id: self.wallet_id.clone(),
        }
    }
}

/// The identity resolved from a request's credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// The authenticated user.
    pub id: UserId,
    /// The viewer's connected payment account, if any.
    pub wallet_id: Option<String>,
}

/// A stay reserved by a tenant. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier.
    pub id: BookingId,
    /// The booked listing.
    pub listing: ListingId,
    /// The tenant who booked the stay.
    pub tenant: UserId,
    /// First day of the stay (inclusive).
    pub check_in: NaiveDate,
    /// Last day of the stay (inclusive).
    pub check_out: NaiveDate,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
}

/// Input to the booking-creation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingInput {
    /// The listing to book.
    pub listing_id: ListingId,
    /// Opaque payment-source token supplied by the tenant.
    pub source: String,
    /// First day of the stay (inclusive).
    pub check_in: NaiveDate,
    /// Last day of the stay (inclusive).
    pub check_out: NaiveDate,
}

/// Sort order for listing browse queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingsSort {
    /// Cheapest first.
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
}

/// One page of a listing browse query.
#[derive(Debug, Clone)]
pub struct ListingsPage {
    /// Total listings matching the query across all pages.
    pub total: u64,
    /// The listings in this page.
    pub result: Vec<Listing>,
}
