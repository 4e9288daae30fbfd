//! HTTP request handlers for API endpoints.

pub mod health;
pub mod quick;
pub mod upload_url;

pub use health::health_handler;
pub use quick::quick_create_handler;
pub use upload_url::{method_not_allowed_handler, upload_url_handler};
