//! Server-rendered pages for sellers and buyers.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration
//! - [`view`] - Derived fields of the ad page

pub mod handlers;
pub mod routes;
pub mod view;
