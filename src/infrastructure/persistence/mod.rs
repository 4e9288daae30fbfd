//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgAdRepository`] - Ad storage and retrieval

pub mod pg_ad_repository;

pub use pg_ad_repository::PgAdRepository;
