//! Ad entity, the single persisted record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A classified ad as stored in the `ads` table.
///
/// `slug` is assigned once at creation and never changes. Ads are never
/// updated or deleted by this service; expiration is a derived state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ad {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub whatsapp: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Ad {
    /// Returns true if the ad has passed its expiry time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }

    /// Returns true if the landing page may show this ad.
    ///
    /// Visible iff published and not expired.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.published && !self.is_expired_at(now)
    }
}

/// Input data for inserting a new ad.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAd {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub whatsapp: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub expires_at: DateTime<Utc>,
}

impl NewAd {
    /// Materializes the row the store would return for this insert.
    pub fn into_ad(self, id: i64, created_at: DateTime<Utc>) -> Ad {
        Ad {
            id,
            slug: self.slug,
            title: self.title,
            description: self.description,
            price: self.price,
            whatsapp: self.whatsapp,
            image_url: self.image_url,
            published: self.published,
            expires_at: Some(self.expires_at),
            created_at,
        }
    }
}
