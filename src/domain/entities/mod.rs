//! Core domain entities.
//!
//! - [`Ad`] - A persisted classified ad
//! - [`NewAd`] - Input for inserting an ad
//! - [`SubmitAdRequest`] - Validated submission input
//! - [`ImageUpload`] - Image bytes received through the interactive form

pub mod ad;
pub mod submission;

pub use ad::{Ad, NewAd};
pub use submission::{ImageUpload, SubmitAdRequest};
