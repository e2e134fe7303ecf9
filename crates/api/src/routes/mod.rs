//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use roost_shared::AppError;

use crate::{AppState, middleware::auth::viewer_middleware};

pub mod bookings;
pub mod health;
pub mod listings;
pub mod users;

/// Creates the API router with all routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Routes that see the (possibly anonymous) viewer identity
    let viewer_routes = Router::new()
        .merge(listings::routes())
        .merge(bookings::routes())
        .merge(users::routes())
        .layer(middleware::from_fn_with_state(state, viewer_middleware));

    Router::new().merge(health::routes()).merge(viewer_routes)
}

/// Renders an application error as a JSON response.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
