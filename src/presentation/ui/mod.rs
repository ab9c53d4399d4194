//! UI screens.

mod action;
mod app;
mod home_screen;
mod login_screen;
mod router;
mod task;

pub use action::AppAction;
pub use app::App;
pub use home_screen::{HomeDeps, HomeScreen};
pub use login_screen::{LoginAction, LoginField, LoginFocus, LoginForm, LoginScreen};
pub use router::{Route, Router};
pub use task::{PendingSubmit, TaskGuard};
