//! Messages sent from background tasks to the event loop.

use crate::application::FetchKind;
use crate::application::dto::LoginOutcome;
use crate::domain::errors::{AuthError, CatalogError};
use crate::domain::ports::ProductPage;

#[derive(Debug)]
pub enum AppAction {
    /// A login submit settled.
    LoginFinished {
        submission_id: u64,
        result: Result<LoginOutcome, AuthError>,
    },
    /// A catalog fetch settled.
    PageLoaded {
        kind: FetchKind,
        result: Result<ProductPage, CatalogError>,
    },
}
