//! Viewer-identity middleware.
//!
//! Resolves the request's bearer token to a viewer and stashes the
//! result in request extensions. Resolution never rejects: anonymous
//! requests carry `None`, and each endpoint decides whether a viewer is
//! required.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::warn;

use roost_core::booking::store::BookingStore;
use roost_core::booking::types::Viewer;

use crate::AppState;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Middleware that resolves the viewer identity, if any.
///
/// A missing or unknown token yields an anonymous request rather than a
/// rejection; the booking pipeline itself rejects unauthenticated
/// booking attempts.
pub async fn viewer_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    let viewer: Option<Viewer> = match token {
        Some(token) => match state.store.find_user_by_token(token).await {
            Ok(user) => user.map(|u| u.as_viewer()),
            Err(e) => {
                warn!(error = %e, "Viewer lookup failed");
                None
            }
        },
        None => None,
    };

    request.extensions_mut().insert(viewer);
    next.run(request).await
}

/// Extractor for the resolved viewer identity.
///
/// Use this in handlers to get the viewer, if any:
///
/// ```ignore
/// async fn handler(RequestViewer(viewer): RequestViewer) -> impl IntoResponse {
///     // viewer: Option<Viewer>
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestViewer(pub Option<Viewer>);

impl<S> FromRequestParts<S> for RequestViewer
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Option<Viewer>>()
            .cloned()
            .map(RequestViewer)
            .ok_or_else(|| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "viewer_not_resolved",
                        "message": "Viewer middleware is not installed"
                    })),
                )
            })
    }
}
