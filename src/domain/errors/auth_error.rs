//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("login cancelled")]
    Cancelled,

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the user can retry by editing the form.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Cancelled)
    }
}
