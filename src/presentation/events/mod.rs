//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::presentation::ui::Route;

/// Result of event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Leave the current screen.
    Back,
    /// Exit application.
    Exit,
}

/// Keys handled before the mounted screen sees them.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event on `route`.
    ///
    /// The login form takes text input, so plain `q` is only a quit key
    /// outside it.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent, route: Route) -> bool {
        match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => true,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } => route != Route::Login,
            _ => false,
        }
    }

    /// Checks if key leaves the current screen.
    #[must_use]
    pub fn is_back_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Classifies a key press.
    #[must_use]
    pub fn classify(key: &KeyEvent, route: Route) -> EventResult {
        if key.kind != KeyEventKind::Press {
            return EventResult::Continue;
        }
        if Self::is_quit_event(key, route) {
            EventResult::Exit
        } else if Self::is_back_event(key) {
            EventResult::Back
        } else {
            EventResult::Continue
        }
    }
}
