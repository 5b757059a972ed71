//! Corner Shop Storefront library.
//!
//! This crate provides the storefront as a library so the router can be
//! exercised in tests and by the binary alike.
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product catalog and listing filter
//! - [`store`] - Per-shopper cart state cell with change and notice channels
//! - [`services`] - Cart registry and contact form delivery
//! - [`routes`] - JSON handlers for products, cart, checkout and contact
//! - [`middleware`] - Request IDs and sessions
//!
//! Handlers never reach a cart through a global: the registry lives in
//! [`AppState`] and the session names which cart belongs to the caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

pub use config::StorefrontConfig;
pub use state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Error-tracking layers are left to the caller.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(session_layer),
        )
        .with_state(state)
}

/// Request span with an empty `request_id` slot filled in by the middleware.
fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if there is nothing to sell.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
