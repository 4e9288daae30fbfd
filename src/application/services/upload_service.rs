//! Signed upload authorization.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::submission::sanitize_extension;
use crate::domain::storage::ObjectStorage;
use crate::error::AppError;
use crate::utils::slug::is_valid_slug;

/// Default validity window of a signed upload URL.
pub const DEFAULT_UPLOAD_URL_TTL: Duration = Duration::from_secs(60);

/// A granted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUpload {
    /// Presigned PUT URL.
    pub token: String,
    /// Object path inside the bucket, `{slug}/{millis}.{ext}`.
    pub path: String,
    /// Where the object is served once uploaded.
    pub public_url: String,
}

/// Service issuing short-lived direct-upload URLs.
///
/// Lets an untrusted client upload straight to the bucket without holding
/// storage credentials.
pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
    ttl: Duration,
}

impl UploadService {
    pub fn new(storage: Arc<dyn ObjectStorage>, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns true if the bucket answers.
    pub async fn storage_healthy(&self) -> bool {
        self.storage.health_check().await
    }

    /// Authorizes one upload scoped to `slug`.
    ///
    /// The extension comes from the content subtype (`image/webp` → `webp`),
    /// defaulting to `jpg`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] - slug or content type missing, or the slug
    ///   is not a well-formed slug
    /// - [`AppError::Upstream`] - storage refused to sign
    pub async fn authorize(
        &self,
        slug: &str,
        content_type: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedUpload, AppError> {
        let slug = slug.trim();
        let content_type = content_type.trim();

        if slug.is_empty() || content_type.is_empty() {
            return Err(AppError::bad_request(
                "Missing slug or contentType",
                json!({ "required": ["slug", "contentType"] }),
            ));
        }

        if !is_valid_slug(slug) {
            return Err(AppError::bad_request(
                "Invalid slug",
                json!({ "slug": slug }),
            ));
        }

        let path = format!(
            "{}/{}.{}",
            slug,
            now.timestamp_millis(),
            extension_for(content_type)
        );

        let token = self
            .storage
            .presign_upload(&path, content_type, self.ttl)
            .await?;
        let public_url = self.storage.public_url(&path);

        tracing::info!(%path, ttl_secs = self.ttl.as_secs(), "Upload authorized");

        Ok(SignedUpload {
            token,
            path,
            public_url,
        })
    }
}

fn extension_for(content_type: &str) -> String {
    let ext = content_type
        .split(';')
        .next()
        .and_then(|ct| ct.split_once('/'))
        .map(|(_, sub)| sanitize_extension(sub))
        .unwrap_or_default();

    if ext.is_empty() { "jpg".to_string() } else { ext }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::MockObjectStorage;
    use chrono::TimeZone;
    use mockall::predicate::*;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_754_049_600_123).unwrap()
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/jpeg"), "jpeg");
        assert_eq!(extension_for("image/PNG; charset=binary"), "png");
        assert_eq!(extension_for("image/svg+xml"), "svgxml");
        assert_eq!(extension_for("image"), "jpg");
        assert_eq!(extension_for("image/"), "jpg");
    }

    #[tokio::test]
    async fn test_authorize_success() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_presign_upload()
            .with(
                eq("bolo-123456/1754049600123.png"),
                eq("image/png"),
                eq(Duration::from_secs(60)),
            )
            .times(1)
            .returning(|_, _, _| Ok("https://bucket.example.com/signed?sig=abc".to_string()));
        storage
            .expect_public_url()
            .returning(|path| format!("https://cdn.example.com/{path}"));

        let service = UploadService::new(Arc::new(storage), DEFAULT_UPLOAD_URL_TTL);
        let upload = service
            .authorize("bolo-123456", "image/png", now())
            .await
            .unwrap();

        assert_eq!(upload.path, "bolo-123456/1754049600123.png");
        assert_eq!(upload.token, "https://bucket.example.com/signed?sig=abc");
        assert_eq!(
            upload.public_url,
            "https://cdn.example.com/bolo-123456/1754049600123.png"
        );
    }

    #[tokio::test]
    async fn test_authorize_missing_fields() {
        let mut storage = MockObjectStorage::new();
        storage.expect_presign_upload().times(0);
        let service = UploadService::new(Arc::new(storage), DEFAULT_UPLOAD_URL_TTL);

        let result = service.authorize("", "image/png", now()).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));

        let result = service.authorize("bolo", "  ", now()).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));

        let result = service.authorize("../etc", "image/png", now()).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_authorize_storage_denied() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_presign_upload()
            .returning(|_, _, _| Err(AppError::upstream("Access denied", json!({}))));

        let service = UploadService::new(Arc::new(storage), DEFAULT_UPLOAD_URL_TTL);
        let result = service.authorize("bolo", "image/jpeg", now()).await;

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
    }
}
