//! Domain layer with core entities, rules and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Star rating breakdown.
pub mod rating;
/// Form validation rules.
pub mod validation;

pub use entities::{Cart, Credentials, Product, ProductId, Rating};
pub use errors::{AuthError, CatalogError, ImageError};
pub use ports::{AuthPort, CatalogPort, ImageLoaderPort};
