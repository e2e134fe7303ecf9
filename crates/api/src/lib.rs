//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Viewer-identity middleware
//! - The payment-gateway HTTP client
//! - Response types

pub mod middleware;
pub mod payments;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use roost_core::booking::BookingService;
use roost_db::MemoryStore;

use crate::payments::StripeGateway;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The document store.
    pub store: Arc<MemoryStore>,
    /// The booking-creation pipeline.
    pub bookings: Arc<BookingService<MemoryStore, StripeGateway>>,
}

impl AppState {
    /// Wires the state from its collaborators.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>, gateway: Arc<StripeGateway>, fee_basis_points: u32) -> Self {
        let bookings = Arc::new(BookingService::new(
            Arc::clone(&store),
            gateway,
            fee_basis_points,
        ));
        Self { store, bookings }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
