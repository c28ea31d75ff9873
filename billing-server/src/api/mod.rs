//! HTTP API
//!
//! - [`health`] - liveness probe
//! - [`billing`] - unit normalization, quotes, submission payloads, print documents

pub mod billing;
pub mod health;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the router without state
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(billing::router())
}

/// Build the router bound to `state`, with CORS and request tracing
pub fn build_router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
