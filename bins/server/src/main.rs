//! Roost API Server
//!
//! Main entry point for the Roost backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roost_api::{AppState, create_router, payments::StripeGateway};
use roost_db::MemoryStore;
use roost_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roost=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create the document store
    let store = Arc::new(MemoryStore::new());
    if config.demo.seed {
        roost_db::seed::seed(&store);
    }

    // Create the payment gateway client
    let gateway = Arc::new(StripeGateway::from_config(&config.payments)?);
    info!(
        gateway_url = %config.payments.gateway_url,
        fee_basis_points = config.payments.fee_basis_points,
        "Payment gateway configured"
    );

    // Create application state
    let state = AppState::new(store, gateway, config.payments.fee_basis_points);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
