//! Storefront - a terminal shop front.
//!
//! A login form with field validation, followed by a virtualized,
//! paginated two-column product grid with pull-to-refresh, load-more
//! and an in-memory cart.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, rules, errors and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for auth, catalog, images and config.
pub mod infrastructure;
/// Presentation layer containing screens, widgets and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "storefront";
