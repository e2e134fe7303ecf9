//! User profile routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tracing::error;

use roost_core::booking::store::BookingStore;
use roost_shared::AppError;
use roost_shared::types::{BookingId, ListingId, UserId};

use super::error_response;
use crate::{AppState, middleware::RequestViewer};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}", get(get_user))
}

/// Response for a user profile.
///
/// Income and the booking list are private: they are only present when
/// the viewer requests their own profile.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Contact email.
    pub contact: String,
    /// Whether the user can receive payouts as a host.
    pub has_wallet: bool,
    /// Accumulated host income in minor units; self only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<i64>,
    /// Bookings made as a tenant; self only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<BookingId>>,
    /// Listings this user hosts.
    pub listings: Vec<ListingId>,
}

/// GET `/users/{user_id}` - User profile.
async fn get_user(
    State(state): State<AppState>,
    RequestViewer(viewer): RequestViewer,
    Path(user_id): Path<UserId>,
) -> impl IntoResponse {
    let user = match state.store.find_user(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return error_response(&AppError::NotFound("User cannot be found".into()));
        }
        Err(e) => {
            error!(error = %e, %user_id, "Failed to fetch user");
            return error_response(&AppError::Store(e.to_string()));
        }
    };

    let authorized = viewer.is_some_and(|v| v.id == user.id);
    let response = UserResponse {
        id: user.id,
        name: user.name,
        avatar: user.avatar,
        contact: user.contact,
        has_wallet: user.wallet_id.is_some(),
        income: authorized.then_some(user.income.minor),
        bookings: authorized.then_some(user.bookings),
        listings: user.listings,
    };

    (StatusCode::OK, Json(response)).into_response()
}
