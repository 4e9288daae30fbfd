//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository and
//! storage calls with validation and visibility rules. Services consume the
//! domain traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::ad_service::AdService`] - Ad creation, interactive and one-step
//! - [`services::landing_service::LandingService`] - Slug to landing outcome
//! - [`services::upload_service::UploadService`] - Signed direct-upload URLs

pub mod services;
