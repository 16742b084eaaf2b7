//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (store reachable)
//!
//! GET  /                       - Welcome text
//!
//! # Customers
//! GET  /customers              - Customer listing (HTML)
//! POST /customers              - Create customer (form or JSON), redirects to listing
//! GET  /customer/new           - Create form
//! ```
//!
//! Update and delete are only available from the console.

pub mod customers;
pub mod home;

use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Create the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/customers", get(customers::index).post(customers::create))
        .route("/customer/new", get(customers::new_form))
}

/// Build the complete application router, including health checks and
/// request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .merge(routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
