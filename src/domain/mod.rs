//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`storage`] - Object storage trait for ad images
//!
//! The domain layer has no dependency on infrastructure or presentation;
//! repository and storage traits are implemented by
//! [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
pub mod storage;
