//! Landing page resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::Ad;
use crate::domain::repositories::AdRepository;

/// Behavior switches for one landing route.
///
/// Both public landing routes go through the same resolver and only differ
/// in these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingOptions {
    /// Load the ad unfiltered and report expiry explicitly instead of
    /// letting the store drop expired rows.
    pub check_expiry_server_side: bool,
    /// Path prefix used to build the canonical URL (`""` or `"/a"`).
    pub route_prefix: &'static str,
}

impl LandingOptions {
    /// `/{slug}`: expired ads get a dedicated page.
    pub const PRIMARY: Self = Self {
        check_expiry_server_side: true,
        route_prefix: "",
    };

    /// `/a/{slug}`: expired ads are indistinguishable from missing ones.
    pub const ALTERNATE: Self = Self {
        check_expiry_server_side: false,
        route_prefix: "/a",
    };
}

/// Result of resolving a slug.
#[derive(Debug, Clone, PartialEq)]
pub enum LandingOutcome {
    Visible(Ad),
    Expired { slug: String, title: String },
    NotFound,
}

/// Service resolving slugs to landing outcomes.
pub struct LandingService {
    repository: Arc<dyn AdRepository>,
}

impl LandingService {
    pub fn new(repository: Arc<dyn AdRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a slug at instant `now`.
    ///
    /// Store failures are logged and reported as [`LandingOutcome::NotFound`];
    /// the visitor never sees an upstream error on a landing page.
    pub async fn resolve(
        &self,
        slug: &str,
        options: LandingOptions,
        now: DateTime<Utc>,
    ) -> LandingOutcome {
        let lookup = if options.check_expiry_server_side {
            self.repository.find_by_slug(slug).await
        } else {
            self.repository.find_visible_by_slug(slug, now).await
        };

        let ad = match lookup {
            Ok(Some(ad)) => ad,
            Ok(None) => {
                tracing::debug!(slug, "Ad not found");
                return LandingOutcome::NotFound;
            }
            Err(e) => {
                tracing::error!(slug, error = %e, "Ad lookup failed");
                return LandingOutcome::NotFound;
            }
        };

        if !ad.published {
            tracing::debug!(slug, "Ad not published");
            return LandingOutcome::NotFound;
        }

        if ad.is_expired_at(now) {
            tracing::debug!(slug, "Ad expired");
            return if options.check_expiry_server_side {
                LandingOutcome::Expired {
                    slug: ad.slug,
                    title: ad.title,
                }
            } else {
                LandingOutcome::NotFound
            };
        }

        LandingOutcome::Visible(ad)
    }
}
