#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use popx_links::application::services::{AdService, LandingService, UploadService};
use popx_links::domain::entities::{Ad, NewAd};
use popx_links::domain::repositories::AdRepository;
use popx_links::domain::storage::ObjectStorage;
use popx_links::error::AppError;
use popx_links::routes::build_router;
use popx_links::state::{AppState, SiteSettings};

pub const SITE_URL: &str = "https://popx.test";
pub const CDN_URL: &str = "https://cdn.popx.test";
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// `ads` table kept in memory, with the same visibility filter as the SQL.
#[derive(Default)]
pub struct InMemoryAdRepository {
    ads: Mutex<Vec<Ad>>,
    next_id: AtomicI64,
    pub fail: AtomicBool,
}

impl InMemoryAdRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, ad: Ad) {
        self.ads.lock().unwrap().push(ad);
    }

    pub fn all(&self) -> Vec<Ad> {
        self.ads.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.ads.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::upstream("Database error", json!({})))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AdRepository for InMemoryAdRepository {
    async fn create(&self, new_ad: NewAd) -> Result<Ad, AppError> {
        self.check()?;
        let mut ads = self.ads.lock().unwrap();
        if ads.iter().any(|a| a.slug == new_ad.slug) {
            return Err(AppError::upstream("Database error", json!({})));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let ad = new_ad.into_ad(id, Utc::now());
        ads.push(ad.clone());
        Ok(ad)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Ad>, AppError> {
        self.check()?;
        Ok(self.ads.lock().unwrap().iter().find(|a| a.slug == slug).cloned())
    }

    async fn find_visible_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Ad>, AppError> {
        self.check()?;
        Ok(self
            .ads
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.slug == slug && a.is_visible_at(now))
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Ad>, AppError> {
        self.check()?;
        let mut ads = self.all();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(ads
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, visible_at: Option<DateTime<Utc>>) -> Result<i64, AppError> {
        self.check()?;
        let ads = self.ads.lock().unwrap();
        let count = match visible_at {
            Some(now) => ads.iter().filter(|a| a.is_visible_at(now)).count(),
            None => ads.len(),
        };
        Ok(count as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// Stored object: content type and bytes.
pub type StoredObject = (String, Vec<u8>);

/// Bucket kept in memory. Presigned URLs are fake but deterministic.
#[derive(Default)]
pub struct InMemoryStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    pub fail: AtomicBool,
}

impl InMemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn paths(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn put_object(
        &self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream("Image upload failed", json!({})));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (content_type.to_string(), body));
        Ok(())
    }

    async fn presign_upload(
        &self,
        path: &str,
        _content_type: &str,
        expires_in: std::time::Duration,
    ) -> Result<String, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::upstream("Could not sign upload", json!({})));
        }
        Ok(format!(
            "https://storage.popx.test/ad-images/{path}?expires={}",
            expires_in.as_secs()
        ))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{CDN_URL}/{path}")
    }

    async fn health_check(&self) -> bool {
        !self.fail.load(Ordering::SeqCst)
    }
}

pub fn create_test_state(
    repo: Arc<InMemoryAdRepository>,
    storage: Arc<InMemoryStorage>,
) -> AppState {
    create_test_state_with_site_url(repo, storage, Some(SITE_URL))
}

pub fn create_test_state_with_site_url(
    repo: Arc<InMemoryAdRepository>,
    storage: Arc<InMemoryStorage>,
    site_url: Option<&str>,
) -> AppState {
    let ad_service = AdService::new(repo.clone(), storage.clone(), MAX_UPLOAD_BYTES);
    let landing_service = LandingService::new(repo);
    let upload_service = UploadService::new(storage, std::time::Duration::from_secs(60));

    AppState::new(
        Arc::new(ad_service),
        Arc::new(landing_service),
        Arc::new(upload_service),
        SiteSettings {
            site_url: site_url.map(str::to_string),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        },
    )
}

/// Server over the full router plus handles on the fakes behind it.
pub fn create_test_server() -> (TestServer, Arc<InMemoryAdRepository>, Arc<InMemoryStorage>) {
    create_test_server_with_site_url(Some(SITE_URL))
}

/// Same as [`create_test_server`] with an explicit `SITE_URL` setting.
pub fn create_test_server_with_site_url(
    site_url: Option<&str>,
) -> (TestServer, Arc<InMemoryAdRepository>, Arc<InMemoryStorage>) {
    let repo = InMemoryAdRepository::new();
    let storage = InMemoryStorage::new();
    let state = create_test_state_with_site_url(repo.clone(), storage.clone(), site_url);

    let server = TestServer::new(build_router(state)).unwrap();
    (server, repo, storage)
}

pub fn sample_ad(slug: &str) -> Ad {
    Ad {
        id: 1,
        slug: slug.to_string(),
        title: "Bolo de Chocolate".to_string(),
        description: "Feito hoje, com cobertura de brigadeiro.".to_string(),
        price: Decimal::new(3990, 2),
        whatsapp: "5511999999999".to_string(),
        image_url: Some("https://cdn.popx.test/public/bolo.png".to_string()),
        published: true,
        expires_at: Some(Utc::now() + Duration::hours(24)),
        created_at: Utc::now(),
    }
}

pub fn expired_ad(slug: &str) -> Ad {
    Ad {
        expires_at: Some(Utc::now() - Duration::hours(1)),
        ..sample_ad(slug)
    }
}

pub fn unpublished_ad(slug: &str) -> Ad {
    Ad {
        published: false,
        ..sample_ad(slug)
    }
}
