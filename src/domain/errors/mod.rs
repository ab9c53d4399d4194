//! Domain error types.

mod auth_error;
mod catalog_error;
mod image_error;

pub use auth_error::AuthError;
pub use catalog_error::CatalogError;
pub use image_error::ImageError;
