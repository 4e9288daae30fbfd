//! DTOs for the signed upload endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::SignedUpload;

/// Request body for `POST /api/upload-url`.
///
/// Missing fields deserialize as empty strings and are rejected by the
/// service, so the client gets the same error either way.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub ok: bool,
    pub token: String,
    pub path: String,
    pub public_url: String,
}

impl From<SignedUpload> for UploadUrlResponse {
    fn from(upload: SignedUpload) -> Self {
        Self {
            ok: true,
            token: upload.token,
            path: upload.path,
            public_url: upload.public_url,
        }
    }
}
