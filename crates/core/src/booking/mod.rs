//! Booking domain types and the booking-creation pipeline.
//!
//! # Modules
//!
//! - `types` - Listing, user, and booking documents
//! - `store` - Document-store trait the pipeline persists through
//! - `service` - The booking transaction coordinator
//! - `error` - Booking-specific error types

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::BookingError;
pub use service::BookingService;
pub use store::{BookingStore, StoreError};
pub use types::{
    Booking, CreateBookingInput, Listing, ListingType, ListingsPage, ListingsSort, User, Viewer,
};
