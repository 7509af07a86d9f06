//! HTTP surface of the bridge.
//!
//! - `POST /event`: forward the raw body to the topic
//! - `GET /metrics`: Prometheus text exposition
//! - `GET /health`: liveness

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{event, health, metrics, AppState, HealthResponse};

/// Build the router with all routes bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/event", post(event))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
