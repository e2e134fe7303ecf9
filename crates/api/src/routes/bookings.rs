//! Booking creation route.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use roost_core::booking::BookingError;
use roost_core::booking::store::BookingStore;
use roost_core::booking::types::{Booking, CreateBookingInput, Listing, User};
use roost_shared::types::{BookingId, ListingId, UserId};

use crate::{AppState, middleware::RequestViewer};

/// Creates the booking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/listings/{listing_id}/bookings", post(create_booking))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Opaque payment-source token.
    pub source: String,
    /// First day of the stay (YYYY-MM-DD).
    pub check_in: NaiveDate,
    /// Last day of the stay (YYYY-MM-DD).
    pub check_out: NaiveDate,
}

/// The booked listing, resolved into the response.
#[derive(Debug, Serialize)]
pub struct BookingListing {
    /// Listing ID.
    pub id: ListingId,
    /// Short title.
    pub title: String,
    /// Cover image URL.
    pub image: String,
    /// City.
    pub city: String,
    /// Nightly price in minor units.
    pub price: i64,
}

impl From<Listing> for BookingListing {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            image: listing.image,
            city: listing.city,
            price: listing.price.minor,
        }
    }
}

/// The booking tenant, resolved into the response.
#[derive(Debug, Serialize)]
pub struct BookingTenant {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
}

impl From<User> for BookingTenant {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
        }
    }
}

/// Response for a created booking.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: BookingId,
    /// The booked listing, when it could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<BookingListing>,
    /// The tenant, when they could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<BookingTenant>,
    /// First day of the stay.
    pub check_in: String,
    /// Last day of the stay.
    pub check_out: String,
    /// Creation timestamp.
    pub created_at: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/listings/{listing_id}/bookings` - Book a stay.
async fn create_booking(
    State(state): State<AppState>,
    RequestViewer(viewer): RequestViewer,
    Path(listing_id): Path<ListingId>,
    Json(payload): Json<CreateBookingRequest>,
) -> impl IntoResponse {
    let input = CreateBookingInput {
        listing_id,
        source: payload.source,
        check_in: payload.check_in,
        check_out: payload.check_out,
    };

    let booking = match state.bookings.create_booking(viewer, input).await {
        Ok(booking) => booking,
        Err(e) => {
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() || matches!(e, BookingError::PaymentFailed(_)) {
                error!(error = %e, %listing_id, "Failed to create booking");
            } else {
                warn!(error = %e, %listing_id, "Booking rejected");
            }
            return (
                status,
                Json(json!({
                    "error": e.error_code(),
                    "message": e.to_string(),
                })),
            )
                .into_response();
        }
    };

    info!(
        booking_id = %booking.id,
        %listing_id,
        tenant = %booking.tenant,
        "Booking created"
    );

    let response = resolve_booking(&state, booking).await;
    (StatusCode::CREATED, Json(response)).into_response()
}

/// Resolves the created booking's listing and tenant for the response.
async fn resolve_booking(state: &AppState, booking: Booking) -> BookingResponse {
    let listing = match state.store.find_listing(booking.listing).await {
        Ok(listing) => listing.map(Into::into),
        Err(e) => {
            warn!(error = %e, booking_id = %booking.id, "Failed to resolve booked listing");
            None
        }
    };
    let tenant = match state.store.find_user(booking.tenant).await {
        Ok(user) => user.map(Into::into),
        Err(e) => {
            warn!(error = %e, booking_id = %booking.id, "Failed to resolve booking tenant");
            None
        }
    };

    BookingResponse {
        id: booking.id,
        listing,
        tenant,
        check_in: booking.check_in.to_string(),
        check_out: booking.check_out.to_string(),
        created_at: booking.created_at.to_rfc3339(),
    }
}
