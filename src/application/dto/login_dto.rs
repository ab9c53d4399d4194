//! Login DTOs.

/// Error text shown under the email field when the backend rejects a login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Placeholder password error: puts the field in its error state without
/// repeating the email message.
pub const BLANK_FIELD_ERROR: &str = " ";

/// Per-field error messages produced by a login attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFieldErrors {
    /// Error for the email field.
    pub email: Option<String>,
    /// Error for the password field.
    pub password: Option<String>,
}

impl LoginFieldErrors {
    /// Errors set after the backend rejected the credentials.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self {
            email: Some(INVALID_CREDENTIALS_MESSAGE.to_string()),
            password: Some(BLANK_FIELD_ERROR.to_string()),
        }
    }

    /// Returns true if neither field has an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted.
    Success {
        /// Email the user signed in with.
        email: String,
    },
    /// Client-side validation failed; the backend was not contacted.
    Invalid(LoginFieldErrors),
    /// The backend rejected the credentials.
    Rejected(LoginFieldErrors),
}

impl LoginOutcome {
    /// Returns true for a successful login.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Field errors to display, empty on success.
    #[must_use]
    pub fn field_errors(&self) -> LoginFieldErrors {
        match self {
            Self::Success { .. } => LoginFieldErrors::default(),
            Self::Invalid(errors) | Self::Rejected(errors) => errors.clone(),
        }
    }
}
