//! Image loading error types.

use thiserror::Error;

/// Errors that can occur while loading a product image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageError {
    /// The image URI is empty or has an unsupported scheme.
    #[error("unsupported image uri: {0}")]
    UnsupportedUri(String),
    /// Reading a local image failed.
    #[error("io error: {0}")]
    Io(String),
    /// Download failed.
    #[error("network error: {0}")]
    Network(String),
    /// Bytes could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),
}
