//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check: store readability and chain layers
//! - everything else - Redirect chain, then the fallback router
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash trimmed before lookup

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed, so `/google/` resolves like `/google`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
