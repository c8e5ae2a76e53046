//! Axum router construction for the FarePulse API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the FarePulse server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/flights` -- list flights departing within a horizon
/// - `GET /api/flights/{id}` -- single flight with seat counts
/// - `GET /api/flights/{id}/price` -- dynamic price quote
/// - `GET /api/flights/{id}/fares` -- fare history
/// - `POST /api/simulate` -- run one demand-simulation pass
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/flights", get(handlers::list_flights))
        .route("/api/flights/{id}", get(handlers::get_flight))
        .route("/api/flights/{id}/price", get(handlers::quote_price))
        .route("/api/flights/{id}/fares", get(handlers::fare_history))
        .route("/api/simulate", post(handlers::run_simulation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
