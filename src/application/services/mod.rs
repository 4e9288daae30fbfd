//! Business logic services for the application layer.

pub mod ad_service;
pub mod landing_service;
pub mod upload_service;

pub use ad_service::AdService;
pub use landing_service::{LandingOptions, LandingOutcome, LandingService};
pub use upload_service::{SignedUpload, UploadService};
