//! HTTP API for the VAT check proxy.

mod handlers;
mod identity;
mod middleware;
mod types;

pub use handlers::*;
pub use identity::ClientIdentity;
pub use middleware::logging_middleware;
pub use types::*;

use crate::limiter::RateLimiter;
use crate::verify::VerificationProxy;
use axum::{
    http::{header, HeaderValue},
    middleware as axum_middleware,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Per-client request limiter
    pub limiter: Arc<RateLimiter>,
    /// VIES lookup
    pub verifier: Arc<VerificationProxy>,
}

impl AppState {
    /// Create new application state.
    pub fn new(limiter: RateLimiter, verifier: VerificationProxy) -> Self {
        Self {
            limiter: Arc::new(limiter),
            verifier: Arc::new(verifier),
        }
    }
}

/// Create the API router.
///
/// Every response carries permissive CORS headers and a content type.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no rate limiting)
        .route("/health", get(handlers::health))
        // Method handling is part of the check pipeline itself
        .route("/check", any(handlers::check_vat))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(logging_middleware))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET, POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )),
        )
        .with_state(state)
}
