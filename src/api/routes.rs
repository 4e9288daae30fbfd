//! API route configuration.
//!
//! The API is public; there is no authentication layer.

use crate::api::handlers::{method_not_allowed_handler, quick_create_handler, upload_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET  /quick`       - One-step ad creation, redirects to the landing page
/// - `POST /upload-url`  - Signed direct-upload URL for an image
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quick", get(quick_create_handler))
        .route(
            "/upload-url",
            post(upload_url_handler).fallback(method_not_allowed_handler),
        )
}
