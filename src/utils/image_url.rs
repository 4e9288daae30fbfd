//! Image URL sanitization.
//!
//! Image URLs end up in `<img src>` and `og:image`, so only web URLs and
//! site-relative paths are accepted.

use url::Url;

/// Path of the placeholder image served from `/static`.
pub const PLACEHOLDER_PATH: &str = "/static/og-fallback.png";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageUrlError {
    #[error("Invalid image URL: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS image URLs are allowed")]
    UnsupportedProtocol,
}

/// Normalizes an image URL.
///
/// - Absolute URLs must be HTTP(S); the host is lowercased, default ports
///   and fragments are removed.
/// - Site-relative paths (`/static/x.png`) are kept as-is.
/// - Protocol-relative (`//host/x.png`) and other schemes are rejected.
///
/// ```ignore
/// assert_eq!(
///     normalize_image_url("HTTPS://CDN.EXAMPLE.COM:443/a.png#x").unwrap(),
///     "https://cdn.example.com/a.png"
/// );
/// ```
pub fn normalize_image_url(input: &str) -> Result<String, ImageUrlError> {
    let input = input.trim();

    if input.starts_with('/') && !input.starts_with("//") {
        return Ok(input.to_string());
    }

    let mut url = Url::parse(input).map_err(|e| ImageUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(ImageUrlError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase))
            .map_err(|e| ImageUrlError::InvalidFormat(e.to_string()))?;
    }

    url.set_fragment(None);

    Ok(url.to_string())
}

/// Makes a stored image reference absolute against the site base URL.
///
/// Empty references fall back to the placeholder.
pub fn absolute_image_url(stored: Option<&str>, base_url: &str) -> String {
    match stored.map(str::trim).filter(|s| !s.is_empty()) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => {
            format!("{}{}", base_url.trim_end_matches('/'), path)
        }
        Some(url) => url.to_string(),
        None => format!("{}{}", base_url.trim_end_matches('/'), PLACEHOLDER_PATH),
    }
}
