//! PostgreSQL implementation of ad repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Ad, NewAd};
use crate::domain::repositories::AdRepository;
use crate::error::AppError;

const AD_COLUMNS: &str = "id, slug, title, description, price, whatsapp, image_url, published, expires_at, created_at";

#[derive(sqlx::FromRow)]
struct AdRow {
    id: i64,
    slug: String,
    title: String,
    description: String,
    price: Decimal,
    whatsapp: String,
    image_url: Option<String>,
    published: bool,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<AdRow> for Ad {
    fn from(r: AdRow) -> Self {
        Ad {
            id: r.id,
            slug: r.slug,
            title: r.title,
            description: r.description,
            price: r.price,
            whatsapp: r.whatsapp,
            image_url: r.image_url,
            published: r.published,
            expires_at: r.expires_at,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for ad storage and retrieval.
///
/// All queries are parameterized.
pub struct PgAdRepository {
    pool: Arc<PgPool>,
}

impl PgAdRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdRepository for PgAdRepository {
    async fn create(&self, new_ad: NewAd) -> Result<Ad, AppError> {
        let sql = format!(
            r#"
            INSERT INTO ads (slug, title, description, price, whatsapp, image_url, published, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {AD_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AdRow>(&sql)
            .bind(new_ad.slug)
            .bind(new_ad.title)
            .bind(new_ad.description)
            .bind(new_ad.price)
            .bind(new_ad.whatsapp)
            .bind(new_ad.image_url)
            .bind(new_ad.published)
            .bind(new_ad.expires_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Ad>, AppError> {
        let sql = format!("SELECT {AD_COLUMNS} FROM ads WHERE slug = $1");

        let row = sqlx::query_as::<_, AdRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Ad::from))
    }

    async fn find_visible_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Ad>, AppError> {
        let sql = format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads
            WHERE slug = $1
              AND published
              AND (expires_at IS NULL OR expires_at > $2)
            "#
        );

        let row = sqlx::query_as::<_, AdRow>(&sql)
            .bind(slug)
            .bind(now)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Ad::from))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Ad>, AppError> {
        let sql = format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM ads
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let rows = sqlx::query_as::<_, AdRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Ad::from).collect())
    }

    async fn count(&self, visible_at: Option<DateTime<Utc>>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM ads
            WHERE $1::timestamptz IS NULL
               OR (published AND (expires_at IS NULL OR expires_at > $1))
            "#,
        )
        .bind(visible_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
