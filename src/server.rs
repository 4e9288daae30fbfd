//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the object storage client and the
//! Axum server lifecycle.

use crate::application::services::{AdService, LandingService, UploadService};
use crate::config::Config;
use crate::domain::repositories::AdRepository;
use crate::domain::storage::ObjectStorage;
use crate::infrastructure::persistence::PgAdRepository;
use crate::infrastructure::storage::S3ObjectStorage;
use crate::routes::app_router;
use crate::state::{AppState, SiteSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - S3 client for ad images
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let repository: Arc<dyn AdRepository> = Arc::new(PgAdRepository::new(Arc::new(pool)));
    let storage: Arc<dyn ObjectStorage> = Arc::new(S3ObjectStorage::connect(&config.storage).await);

    let state = build_state(&config, repository, storage);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wires services over the given store and storage.
pub fn build_state(
    config: &Config,
    repository: Arc<dyn AdRepository>,
    storage: Arc<dyn ObjectStorage>,
) -> AppState {
    let ad_service = AdService::new(repository.clone(), storage.clone(), config.max_upload_bytes);
    let landing_service = LandingService::new(repository);
    let upload_service = UploadService::new(
        storage,
        Duration::from_secs(config.upload_url_ttl_seconds),
    );

    AppState::new(
        Arc::new(ad_service),
        Arc::new(landing_service),
        Arc::new(upload_service),
        SiteSettings {
            site_url: config.site_url.clone(),
            max_upload_bytes: config.max_upload_bytes,
        },
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
