//! Listing browse and detail routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use roost_core::booking::store::BookingStore;
use roost_core::booking::types::{Booking, Listing, ListingType, ListingsSort};
use roost_core::calendar::BookingCalendar;
use roost_shared::AppError;
use roost_shared::types::{BookingId, ListingId, PageRequest, UserId};

use super::error_response;
use crate::{AppState, middleware::RequestViewer};

/// Creates the listing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list_listings))
        .route("/listings/{listing_id}", get(get_listing))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for browsing listings.
#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    /// Price sort order.
    pub sort: Option<ListingsSort>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

/// One listing in a browse result.
#[derive(Debug, Serialize)]
pub struct ListingSummary {
    /// Listing ID.
    pub id: ListingId,
    /// Short title.
    pub title: String,
    /// Cover image URL.
    pub image: String,
    /// City.
    pub city: String,
    /// Administrative region.
    pub admin: String,
    /// Country.
    pub country: String,
    /// Property kind.
    pub listing_type: ListingType,
    /// Nightly price in minor units.
    pub price: i64,
    /// Maximum number of guests.
    pub num_of_guests: u32,
}

impl From<Listing> for ListingSummary {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            image: listing.image,
            city: listing.city,
            admin: listing.admin,
            country: listing.country,
            listing_type: listing.listing_type,
            price: listing.price.minor,
            num_of_guests: listing.num_of_guests,
        }
    }
}

/// Response for a browse query.
#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    /// Total listings across all pages.
    pub total: u64,
    /// The listings in this page.
    pub result: Vec<ListingSummary>,
}

/// Response for a listing detail request.
#[derive(Debug, Serialize)]
pub struct ListingDetail {
    /// Listing ID.
    pub id: ListingId,
    /// The host who owns the listing.
    pub host: UserId,
    /// Short title.
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
    /// Administrative region.
    pub admin: String,
    /// Country.
    pub country: String,
    /// Nightly price in minor units.
    pub price: i64,
    /// Maximum number of guests.
    pub num_of_guests: u32,
    /// Days already reserved.
    pub calendar: BookingCalendar,
    /// The listing's bookings; only present for the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<ListingBooking>>,
}

/// One booking in a host's listing detail.
#[derive(Debug, Serialize)]
pub struct ListingBooking {
    /// Booking ID.
    pub id: BookingId,
    /// The tenant who booked the stay.
    pub tenant: UserId,
    /// First day of the stay.
    pub check_in: String,
    /// Last day of the stay.
    pub check_out: String,
}

impl From<Booking> for ListingBooking {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            tenant: booking.tenant,
            check_in: booking.check_in.to_string(),
            check_out: booking.check_out.to_string(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/listings` - Browse listings with optional price sorting.
async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingsQuery>,
) -> impl IntoResponse {
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.limit.unwrap_or(10),
    }
    .clamped();

    match state.store.list_listings(query.sort, page).await {
        Ok(listings) => {
            let response = ListingsResponse {
                total: listings.total,
                result: listings.result.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to browse listings");
            error_response(&AppError::Store(e.to_string()))
        }
    }
}

/// GET `/listings/{listing_id}` - Listing detail.
///
/// The bookings sub-list is only included when the viewer hosts the
/// listing.
async fn get_listing(
    State(state): State<AppState>,
    RequestViewer(viewer): RequestViewer,
    Path(listing_id): Path<ListingId>,
) -> impl IntoResponse {
    let listing = match state.store.find_listing(listing_id).await {
        Ok(Some(listing)) => listing,
        Ok(None) => {
            return error_response(&AppError::NotFound("Listing cannot be found".into()));
        }
        Err(e) => {
            error!(error = %e, %listing_id, "Failed to fetch listing");
            return error_response(&AppError::Store(e.to_string()));
        }
    };

    let authorized = viewer.is_some_and(|v| v.id == listing.host);
    let bookings = if authorized {
        match state.store.find_bookings(&listing.bookings).await {
            Ok(bookings) => Some(bookings.into_iter().map(Into::into).collect()),
            Err(e) => {
                error!(error = %e, %listing_id, "Failed to fetch listing bookings");
                None
            }
        }
    } else {
        None
    };

    let detail = ListingDetail {
        id: listing.id,
        host: listing.host,
        title: listing.title,
        description: listing.description,
        image: listing.image,
        listing_type: listing.listing_type,
        address: listing.address,
        city: listing.city,
        admin: listing.admin,
        country: listing.country,
        price: listing.price.minor,
        num_of_guests: listing.num_of_guests,
        calendar: listing.calendar,
        bookings,
    };

    (StatusCode::OK, Json(detail)).into_response()
}
