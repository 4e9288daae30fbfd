//! Repository trait for ad data access.

use crate::domain::entities::{Ad, NewAd};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the `ads` store.
///
/// Insert-only: there is no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAdRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_ad.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdRepository: Send + Sync {
    /// Inserts a new ad and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors, including a slug
    /// collision.
    async fn create(&self, new_ad: NewAd) -> Result<Ad, AppError>;

    /// Finds an ad by slug regardless of its visibility.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Ad>, AppError>;

    /// Finds an ad by slug, filtering out unpublished and expired rows in the
    /// query itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn find_visible_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Ad>, AppError>;

    /// Lists ads, newest first.
    ///
    /// # Arguments
    ///
    /// - `limit` - Maximum number of rows
    /// - `offset` - Rows to skip
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Ad>, AppError>;

    /// Counts ads; with `visible_at`, only those visible at that instant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on database errors.
    async fn count(&self, visible_at: Option<DateTime<Utc>>) -> Result<i64, AppError>;

    /// Round-trips a trivial query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
