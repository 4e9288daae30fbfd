//! Handlers for signed upload authorization.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use chrono::Utc;

use crate::api::dto::upload_url::{UploadUrlRequest, UploadUrlResponse};
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Issues a short-lived URL the client can PUT an image to.
///
/// # Endpoint
///
/// `POST /api/upload-url`
///
/// # Request Body
///
/// Parsed as JSON whatever the `Content-Type`, so a plain-text
/// `JSON.stringify` body from `fetch` is accepted too.
///
/// ```json
/// { "slug": "bolo-de-chocolate-600123", "contentType": "image/png" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "token": "https://bucket.s3.amazonaws.com/bolo-de-chocolate-600123/1754049600123.png?X-Amz-...",
///   "path": "bolo-de-chocolate-600123/1754049600123.png",
///   "publicUrl": "https://cdn.popx.app/bolo-de-chocolate-600123/1754049600123.png"
/// }
/// ```
///
/// # Errors
///
/// - **400** - unreadable body, missing `slug` or `contentType`
/// - **500** - storage refused to sign
pub async fn upload_url_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let request: UploadUrlRequest = serde_json::from_slice(&body).map_err(|e| {
        AppError::bad_request("Invalid JSON body", serde_json::json!({ "reason": e.to_string() }))
    })?;

    let upload = state
        .upload_service
        .authorize(&request.slug, &request.content_type, Utc::now())
        .await?;

    Ok(Json(upload.into()))
}

/// Answers any method other than POST on `/api/upload-url`.
pub async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            ok: false,
            error: "Method not allowed".to_string(),
            code: "method_not_allowed",
            details: serde_json::Value::Null,
        }),
    )
}
