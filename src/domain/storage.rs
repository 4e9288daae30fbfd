//! Object storage contract for ad images.

use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;

/// Object storage holding ad images.
///
/// Objects are written once and addressed by path inside a single bucket.
/// Their public URL is derivable from the path without a network call.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::S3ObjectStorage`] - S3-compatible bucket
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads an object.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the storage service rejects the write.
    async fn put_object(
        &self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), AppError>;

    /// Creates a time-bound URL allowing one unauthenticated PUT to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the URL cannot be signed.
    async fn presign_upload(
        &self,
        path: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, AppError>;

    /// Public URL an uploaded object will be served from.
    fn public_url(&self, path: &str) -> String;

    /// Returns true if the bucket is reachable.
    async fn health_check(&self) -> bool;
}
