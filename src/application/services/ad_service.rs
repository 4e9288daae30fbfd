//! Ad submission service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Ad, ImageUpload, NewAd, SubmitAdRequest};
use crate::domain::repositories::AdRepository;
use crate::domain::storage::ObjectStorage;
use crate::error::AppError;
use crate::utils::expiration::resolve_expiration;
use crate::utils::image_url::PLACEHOLDER_PATH;
use crate::utils::slug::{INTERACTIVE_SLUG_MAX_LEN, SlugStyle, generate_slug, slugify};

/// Folder inside the bucket holding images uploaded through the form.
const FORM_UPLOAD_FOLDER: &str = "public";

/// Service creating ads through either submission mode.
///
/// Every successful call performs exactly one store insert, preceded in the
/// interactive mode by one object upload. Nothing is rolled back: an upload
/// followed by a failed insert leaves the object orphaned.
pub struct AdService {
    repository: Arc<dyn AdRepository>,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
}

impl AdService {
    /// Creates a new ad service.
    pub fn new(
        repository: Arc<dyn AdRepository>,
        storage: Arc<dyn ObjectStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            repository,
            storage,
            max_upload_bytes,
        }
    }

    /// Largest image accepted by [`Self::create_interactive`].
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// One-step creation from already-resolved fields.
    ///
    /// The slug uses the timestamp suffix; a missing image falls back to the
    /// placeholder path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Parse`] for a malformed expiration and
    /// [`AppError::Upstream`] if the insert fails.
    pub async fn create_quick(
        &self,
        request: SubmitAdRequest,
        now: DateTime<Utc>,
    ) -> Result<Ad, AppError> {
        let expires_at = resolve_expiration(request.expires.as_deref(), now)?;
        let slug = generate_slug(&request.title, SlugStyle::Quick, now);
        let image_url = request
            .image_url
            .unwrap_or_else(|| PLACEHOLDER_PATH.to_string());

        let new_ad = NewAd {
            slug,
            title: request.title,
            description: request.description,
            price: request.price,
            whatsapp: request.whatsapp,
            image_url: Some(image_url),
            published: true,
            expires_at,
        };

        self.insert(new_ad, "quick").await
    }

    /// Two-step creation: upload the image, then insert the ad.
    ///
    /// The image lands at `public/{millis}-{title-slug}.{ext}` and the ad
    /// references its public URL. The slug carries the `popx-` prefix and a
    /// random suffix.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the image is empty, too large, or
    /// not an image; [`AppError::Parse`] for a malformed expiration;
    /// [`AppError::Upstream`] if the upload or the insert fails.
    pub async fn create_interactive(
        &self,
        request: SubmitAdRequest,
        image: ImageUpload,
        now: DateTime<Utc>,
    ) -> Result<Ad, AppError> {
        self.validate_image(&image)?;
        let expires_at = resolve_expiration(request.expires.as_deref(), now)?;

        let title_slug = slugify(&request.title, INTERACTIVE_SLUG_MAX_LEN);
        let file_stem = if title_slug.is_empty() {
            now.timestamp_millis().to_string()
        } else {
            format!("{}-{}", now.timestamp_millis(), title_slug)
        };
        let path = format!("{}/{}.{}", FORM_UPLOAD_FOLDER, file_stem, image.extension());
        let content_type = image.effective_content_type().to_string();

        self.storage
            .put_object(&path, &content_type, image.bytes)
            .await?;
        let image_url = self.storage.public_url(&path);
        tracing::debug!(%path, "Image uploaded");

        let new_ad = NewAd {
            slug: generate_slug(&request.title, SlugStyle::Interactive, now),
            title: request.title,
            description: request.description,
            price: request.price,
            whatsapp: request.whatsapp,
            image_url: Some(image_url),
            published: true,
            expires_at,
        };

        self.insert(new_ad, "interactive").await.inspect_err(|_| {
            tracing::warn!(%path, "Insert failed after upload; object left in storage");
        })
    }

    /// Returns true if the store answers a trivial query.
    pub async fn store_healthy(&self) -> bool {
        self.repository.ping().await.is_ok()
    }

    async fn insert(&self, new_ad: NewAd, mode: &'static str) -> Result<Ad, AppError> {
        let ad = self.repository.create(new_ad).await?;

        metrics::counter!("ads_created_total", "mode" => mode).increment(1);
        tracing::info!(slug = %ad.slug, mode, "Ad created");

        Ok(ad)
    }

    fn validate_image(&self, image: &ImageUpload) -> Result<(), AppError> {
        if image.bytes.is_empty() {
            return Err(AppError::bad_request(
                "An image is required",
                json!({ "field": "image" }),
            ));
        }

        if image.bytes.len() > self.max_upload_bytes {
            return Err(AppError::bad_request(
                "Image is too large",
                json!({ "max_bytes": self.max_upload_bytes, "size": image.bytes.len() }),
            ));
        }

        let is_image = image
            .content_type
            .as_deref()
            .is_none_or(|ct| ct.trim().is_empty() || ct.starts_with("image/"));
        if !is_image {
            return Err(AppError::bad_request(
                "File must be an image",
                json!({ "content_type": image.content_type }),
            ));
        }

        Ok(())
    }
}
