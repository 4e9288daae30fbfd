//! S3-compatible object storage for ad images.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use serde_json::json;
use std::time::Duration;

use crate::config::StorageConfig;
use crate::domain::storage::ObjectStorage;
use crate::error::AppError;

/// Object storage backed by a single S3 bucket.
///
/// Credentials come from the standard AWS provider chain
/// (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, profile, instance role).
/// A custom endpoint enables S3-compatible services such as MinIO, R2 or
/// Supabase Storage.
pub struct S3ObjectStorage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStorage {
    /// Creates a storage handle around an existing client.
    pub fn new(client: S3Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the S3 client from configuration.
    pub async fn connect(config: &StorageConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = S3Client::from_conf(builder.build());
        tracing::info!(bucket = %config.bucket, "Object storage client initialized");

        Self::new(client, config.bucket.clone(), config.public_base_url())
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(
        &self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path, "Object upload failed: {}", e);
                AppError::upstream("Image upload failed", json!({ "path": path }))
            })?;

        Ok(())
    }

    async fn presign_upload(
        &self,
        path: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            AppError::upstream(
                "Invalid upload URL lifetime",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| {
                tracing::error!(path, "Upload URL signing failed: {}", e);
                AppError::upstream("Could not create upload URL", json!({ "path": path }))
            })?;

        Ok(request.uri().to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path.trim_start_matches('/'))
    }

    async fn health_check(&self) -> bool {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
    }
}
