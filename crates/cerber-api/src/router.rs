//! Route definitions for the Cerber HTTP API.

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Builds the router with every route and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/v1", v1_routes())
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login and token endpoints
fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::login::login))
        .route("/token/refresh", get(handlers::token::refresh))
        .route("/token/validate", get(handlers::token::validate))
}
