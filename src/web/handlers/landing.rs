//! Public ad landing pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::application::services::{LandingOptions, LandingOutcome};
use crate::state::AppState;
use crate::utils::site_url::resolve_base_url;
use crate::utils::slug::is_valid_slug;
use crate::web::handlers::not_found::NotFoundTemplate;
use crate::web::view::AdPage;

/// Renders `templates/ad.html` with title, price, description, image,
/// the WhatsApp button, Open Graph/Twitter tags and JSON-LD.
#[derive(Template, WebTemplate)]
#[template(path = "ad.html")]
struct AdTemplate {
    page: AdPage,
}

/// Renders `templates/expired.html`, marked `noindex`.
#[derive(Template, WebTemplate)]
#[template(path = "expired.html")]
struct ExpiredTemplate {
    title: String,
}

/// Landing page with server-side expiry check.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Response Codes
///
/// - **200 OK**: ad page
/// - **404 Not Found**: unknown or unpublished slug
/// - **410 Gone**: the ad expired
pub async fn landing_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    render_landing(&state, &slug, LandingOptions::PRIMARY, &headers).await
}

/// Landing page relying on the store-side visibility filter.
///
/// # Endpoint
///
/// `GET /a/{slug}`
///
/// Expired ads answer **404** here, like missing ones.
pub async fn alternate_landing_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    render_landing(&state, &slug, LandingOptions::ALTERNATE, &headers).await
}

async fn render_landing(
    state: &AppState,
    slug: &str,
    options: LandingOptions,
    headers: &HeaderMap,
) -> Response {
    if !is_valid_slug(slug) {
        return (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response();
    }

    match state.landing_service.resolve(slug, options, Utc::now()).await {
        LandingOutcome::Visible(ad) => {
            let base_url = resolve_base_url(state.site_url(), headers).unwrap_or_else(|e| {
                tracing::warn!("Falling back to relative URLs: {}", e);
                String::new()
            });
            let page = AdPage::build(&ad, &base_url, options.route_prefix);
            AdTemplate { page }.into_response()
        }
        LandingOutcome::Expired { title, .. } => {
            (StatusCode::GONE, ExpiredTemplate { title }).into_response()
        }
        LandingOutcome::NotFound => (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response(),
    }
}
