//! Shared application state.

use std::sync::Arc;

use crate::application::services::{AdService, LandingService, UploadService};

/// Request-independent site settings.
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    /// Configured public base URL; `None` derives it from the `Host` header.
    pub site_url: Option<String>,
    /// Largest multipart body accepted by `POST /bridge`.
    pub max_upload_bytes: usize,
}

/// State injected into every handler.
///
/// Built once in [`crate::server::run`]; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub ad_service: Arc<AdService>,
    pub landing_service: Arc<LandingService>,
    pub upload_service: Arc<UploadService>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    pub fn new(
        ad_service: Arc<AdService>,
        landing_service: Arc<LandingService>,
        upload_service: Arc<UploadService>,
        site: SiteSettings,
    ) -> Self {
        Self {
            ad_service,
            landing_service,
            upload_service,
            site: Arc::new(site),
        }
    }

    /// Configured site URL, if any.
    pub fn site_url(&self) -> Option<&str> {
        self.site.site_url.as_deref()
    }
}
