//! Validated submission input.

use rust_decimal::Decimal;

/// A submission request that passed boundary validation.
///
/// Built from loosely-typed query parameters or form fields by
/// [`crate::api::dto::ad_input::AdInput::into_request`]. Nothing downstream
/// sees unvalidated input.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAdRequest {
    pub title: String,
    pub price: Decimal,
    /// Digits only.
    pub whatsapp: String,
    pub description: String,
    /// Raw expiration input, resolved by the service.
    pub expires: Option<String>,
    /// Sanitized image URL (quick-create only).
    pub image_url: Option<String>,
}

/// An image received through the interactive form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// File extension for the stored object.
    ///
    /// Taken from the file name, then the content subtype, then `jpg`.
    /// Restricted to lowercase ASCII alphanumerics.
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext));

        let from_type = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .and_then(|ct| ct.split_once('/').map(|(_, sub)| sub));

        [from_name, from_type]
            .into_iter()
            .flatten()
            .map(sanitize_extension)
            .find(|ext| !ext.is_empty())
            .unwrap_or_else(|| "jpg".to_string())
    }

    /// Content type to store the object with.
    pub fn effective_content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or("application/octet-stream")
    }
}

/// Lowercases and keeps only `[a-z0-9]`, capped at 10 characters.
pub fn sanitize_extension(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(10)
        .collect()
}
