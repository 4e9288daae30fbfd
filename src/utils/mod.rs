//! Utility functions for slugs, expirations, prices and link building.
//!
//! - [`slug`] - Slug generation and validation
//! - [`expiration`] - Expiration input resolution
//! - [`money`] - Price parsing and pt-BR formatting
//! - [`whatsapp`] - Click-to-chat link construction
//! - [`image_url`] - Image URL sanitization and placeholder fallback
//! - [`site_url`] - Public base URL resolution from config or `Host`
//! - [`text`] - Truncation and fallback helpers

pub mod expiration;
pub mod image_url;
pub mod money;
pub mod site_url;
pub mod slug;
pub mod text;
pub mod whatsapp;
