//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Home page
//! - `GET  /{slug}`      - Ad landing page (410 when expired)
//! - `GET  /a/{slug}`    - Ad landing page (404 when expired)
//! - `/bridge`           - Submission form
//! - `/api/*`            - JSON API (quick-create, signed uploads)
//! - `GET  /health`      - Health check: database, storage
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "static";

/// Builds the router with every route and the tracing layer.
///
/// Exposed separately from [`app_router`] so tests can drive it directly.
pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.site.max_upload_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .merge(web::routes::routes(max_upload_bytes))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with path normalization applied.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
