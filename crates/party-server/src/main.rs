//! party-server
//!
//! Development server for the party front end. Serves the built WASM bundle
//! and a stand-in party backend, so the payment-completion flow can be run
//! end to end without the production API.

mod handlers;
mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handlers::{
    confirm_join, confirm_leader_deposit, create_party, delete_party, get_party, health_check,
};
use crate::state::AppState;

/// Build the application router
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/parties", post(create_party))
        .route("/api/parties/{party_id}", get(get_party).delete(delete_party))
        .route("/api/parties/{party_id}/leader-deposit", post(confirm_leader_deposit))
        .route("/api/parties/{party_id}/join", post(confirm_join))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());
    let app = build_router(AppState::default(), &static_dir);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("party-server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health                              - Health check");
    tracing::info!("  POST   /api/parties                         - Create party");
    tracing::info!("  GET    /api/parties/{{id}}                    - Inspect party");
    tracing::info!("  DELETE /api/parties/{{id}}                    - Drop party");
    tracing::info!("  POST   /api/parties/{{id}}/leader-deposit     - Confirm leader deposit");
    tracing::info!("  POST   /api/parties/{{id}}/join               - Confirm join payment");
    tracing::info!("Static files served from {}", static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
