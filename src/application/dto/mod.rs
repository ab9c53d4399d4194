//! Data transfer objects for the application layer.

mod login_dto;

pub use login_dto::{
    BLANK_FIELD_ERROR, INVALID_CREDENTIALS_MESSAGE, LoginFieldErrors, LoginOutcome,
};
