//! Infrastructure layer with external service adapters.

/// Authentication backends.
pub mod auth;
/// Product catalog suppliers.
pub mod catalog;
/// Application configuration.
pub mod config;
/// Image loading and caching.
pub mod image;

pub use auth::DemoAuthenticator;
pub use catalog::JsonFileCatalog;
pub use config::{AppConfig, CliArgs, ConfigStore, InitialRoute, LoadedConfig, LogLevel};
pub use image::{ImageLoadedEvent, ImageLoader, ImageLoaderConfig};
