//! Catalog error types.

use thiserror::Error;

/// Errors raised by a product data supplier.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error("catalog source not found: {path}")]
    NotFound { path: String },

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id {id} in catalog")]
    DuplicateId { id: u64 },
}
