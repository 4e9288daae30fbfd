//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for serialization. Submission input is checked with
//! validator before it reaches a service.

pub mod ad_input;
pub mod health;
pub mod upload_url;
