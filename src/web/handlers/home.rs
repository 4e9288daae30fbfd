//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Renders `templates/home.html`: what PopX is and a link to the form.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {}

/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    HomeTemplate {}
}
