//! Authentication backend adapters.

mod demo_auth;

pub use demo_auth::{DEFAULT_DELAY, DEMO_EMAIL, DEMO_PASSWORD, DemoAuthenticator};
