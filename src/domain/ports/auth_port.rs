//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::Credentials;
use crate::domain::errors::AuthError;

/// Port for the authentication backend.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Checks the credentials, resolving once the backend has answered.
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        should_succeed: Arc<AtomicBool>,
        calls: AtomicUsize,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed: Arc::new(AtomicBool::new(should_succeed)),
                calls: AtomicUsize::new(0),
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }

        /// Number of `authenticate` calls so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<(), AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
