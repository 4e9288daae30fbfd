//! Handler for one-step ad creation.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::api::dto::ad_input::AdInput;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an ad from query parameters and redirects to its landing page.
///
/// # Endpoint
///
/// `GET /api/quick?title=&price=&whatsapp=&desc=&expires=&image_url=`
///
/// # Response Codes
///
/// - **302 Found**: `Location: /a/{slug}`
/// - **400 Bad Request**: title, price or whatsapp missing or malformed
/// - **500 Internal Server Error**: malformed `expires` or store failure
///
/// # Example
///
/// ```text
/// GET /api/quick?title=Bolo%20de%20Chocolate&price=39.9&whatsapp=5511999999999&expires=48h
/// 302 Location: /a/bolo-de-chocolate-600123
/// ```
pub async fn quick_create_handler(
    State(state): State<AppState>,
    query: Result<Query<AdInput>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(input) = query.map_err(|e| {
        AppError::bad_request("Invalid query string", serde_json::json!({ "reason": e.body_text() }))
    })?;

    let request = input.into_request()?;
    let ad = state.ad_service.create_quick(request, Utc::now()).await?;

    let location = format!("/a/{}", ad.slug);
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
