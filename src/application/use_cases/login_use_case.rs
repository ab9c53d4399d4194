//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginFieldErrors, LoginOutcome};
use crate::domain::entities::Credentials;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;
use crate::domain::validation::{email_rules, password_rules};

/// Validates credentials and runs them past the authentication backend.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Runs the field rules only.
    #[must_use]
    pub fn validate(credentials: &Credentials) -> LoginFieldErrors {
        LoginFieldErrors {
            email: email_rules()
                .validate(credentials.email())
                .map(str::to_string),
            password: password_rules()
                .validate(credentials.password())
                .map(str::to_string),
        }
    }

    /// Executes a login attempt.
    ///
    /// Invalid input never reaches the backend. A credentials mismatch is
    /// reported as [`LoginOutcome::Rejected`], not as an error.
    ///
    /// # Errors
    /// Returns error if the backend fails for any other reason.
    pub async fn execute(&self, credentials: Credentials) -> Result<LoginOutcome, AuthError> {
        let errors = Self::validate(&credentials);
        if !errors.is_empty() {
            debug!(?errors, "Login input failed validation");
            return Ok(LoginOutcome::Invalid(errors));
        }

        debug!(email = %credentials.email(), "Attempting login");

        match self.auth_port.authenticate(&credentials).await {
            Ok(()) => {
                info!(email = %credentials.email(), "Successfully authenticated");
                Ok(LoginOutcome::Success {
                    email: credentials.email().to_string(),
                })
            }
            Err(AuthError::InvalidCredentials) => {
                warn!(email = %credentials.email(), "Credentials rejected");
                Ok(LoginOutcome::Rejected(LoginFieldErrors::invalid_credentials()))
            }
            Err(e) => {
                warn!(error = %e, "Authentication failed");
                Err(e)
            }
        }
    }
}
