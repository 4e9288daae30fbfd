//! Public base URL resolution.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Resolves the public base URL used for canonical links and redirects.
///
/// The configured site URL wins. Without one, the base is derived from the
/// request `Host` header as `https://{host}`, port included. The result never
/// ends with `/`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no site URL is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "popx.app:8080".parse().unwrap());
///
/// let base = resolve_base_url(None, &headers).unwrap();
/// assert_eq!(base, "https://popx.app:8080");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(site_url) = configured.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(site_url.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request(
            "Missing Host header",
            serde_json::json!({}),
        ));
    }

    Ok(format!("https://{}", host.trim_end_matches('/')))
}
