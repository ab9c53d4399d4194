//! Placeholder authentication backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::Credentials;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// Email of the single accepted account. Compared case-insensitively.
pub const DEMO_EMAIL: &str = "demo@example.com";
/// Password of the single accepted account. Compared exactly.
pub const DEMO_PASSWORD: &str = "Password1";
/// Default simulated round-trip time.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// Accepts one fixed credential pair after a simulated delay.
#[derive(Debug, Clone)]
pub struct DemoAuthenticator {
    delay: Duration,
}

impl DemoAuthenticator {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns true if the pair matches the demo account.
    #[must_use]
    pub fn accepts(credentials: &Credentials) -> bool {
        credentials.email().to_lowercase() == DEMO_EMAIL && credentials.password() == DEMO_PASSWORD
    }
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl AuthPort for DemoAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError> {
        debug!(delay_ms = self.delay.as_millis(), "Simulating authentication round-trip");
        tokio::time::sleep(self.delay).await;

        if Self::accepts(credentials) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::dto::{BLANK_FIELD_ERROR, INVALID_CREDENTIALS_MESSAGE, LoginFieldErrors};
    use crate::application::LoginUseCase;

    #[test]
    fn test_accepts_email_in_any_case() {
        assert!(DemoAuthenticator::accepts(&Credentials::new(
            "Demo@Example.COM",
            "Password1"
        )));
        assert!(!DemoAuthenticator::accepts(&Credentials::new(
            "demo@example.com",
            "password1"
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_only_after_delay() {
        let auth = DemoAuthenticator::default();
        let credentials = Credentials::new("demo@example.com", "Password1");

        let started = tokio::time::Instant::now();
        auth.authenticate(&credentials).await.unwrap();

        assert!(started.elapsed() >= DEFAULT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_password_is_rejected_after_delay() {
        let auth = DemoAuthenticator::default();
        let credentials = Credentials::new("demo@example.com", "wrong1");

        let started = tokio::time::Instant::now();
        let result = auth.authenticate(&credentials).await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(started.elapsed() >= DEFAULT_DELAY);

        let errors = LoginFieldErrors::invalid_credentials();
        assert_eq!(errors.email.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
        assert_eq!(errors.password.as_deref(), Some(BLANK_FIELD_ERROR));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_flow_with_demo_backend() {
        let use_case = LoginUseCase::new(Arc::new(DemoAuthenticator::default()));

        let outcome = use_case
            .execute(Credentials::new("DEMO@example.com", "Password1"))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert!(outcome.field_errors().is_empty());
    }
}
