//! HTML page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    alternate_landing_handler, bridge_form_handler, bridge_submit_handler, home_handler,
    landing_handler,
};
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get};

/// Headroom above the image limit for the text fields and multipart framing.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Public page routes.
///
/// # Endpoints
///
/// - `GET  /`          - Home page
/// - `GET  /bridge`    - Submission form, prefilled from the query string
/// - `POST /bridge`    - Interactive submission (multipart)
/// - `GET  /a/{slug}`  - Landing page, expired ads answer 404
/// - `GET  /{slug}`    - Landing page, expired ads answer 410
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route(
            "/bridge",
            get(bridge_form_handler)
                .post(bridge_submit_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes + FORM_OVERHEAD_BYTES)),
        )
        .route("/a/{slug}", get(alternate_landing_handler))
        .route("/{slug}", get(landing_handler))
}
