//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`AdRepository`] - Ad insert and lookup by slug
//!
//! # Testing
//!
//! See integration tests in `tests/repository_ad.rs` for usage examples.

pub mod ad_repository;

pub use ad_repository::AdRepository;

#[cfg(test)]
pub use ad_repository::MockAdRepository;
