//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::dto::{LoginFieldErrors, LoginOutcome};
use crate::application::use_cases::LoginUseCase;
use crate::domain::entities::Credentials;
use crate::domain::errors::AuthError;
use crate::domain::validation::{email_rules, password_rules};
use crate::presentation::theme::Theme;
use crate::presentation::ui::action::AppAction;
use crate::presentation::ui::task::PendingSubmit;
use crate::presentation::widgets::{
    BUTTON_HEIGHT, FIELD_HEIGHT, PrimaryButton, PrimaryButtonStyle, StatusMessage, TextInput,
    TextInputField, TextInputStyle,
};

pub const TITLE: &str = "Welcome back";
pub const SIGN_IN_LABEL: &str = "Sign in";
pub const SIGNING_IN_LABEL: &str = "Signing in...";
const SIGN_UP_PROMPT: &str = "Don't have an account?";
const SIGN_UP_LINK: &str = " Sign up";
const FORM_WIDTH: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Submit,
}

impl LoginFocus {
    const fn next(self) -> Self {
        match self {
            Self::Email => Self::Password,
            Self::Password => Self::Submit,
            Self::Submit => Self::Email,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Email => Self::Submit,
            Self::Password => Self::Email,
            Self::Submit => Self::Password,
        }
    }

    const fn field(self) -> Option<LoginField> {
        match self {
            Self::Email => Some(LoginField::Email),
            Self::Password => Some(LoginField::Password),
            Self::Submit => None,
        }
    }
}

/// Form values, touched flags and per-field errors.
///
/// A field's error is shown only once it has been touched (blurred or
/// submitted). Editing a touched field re-validates it on each keystroke.
#[derive(Debug)]
pub struct LoginForm {
    email: TextInputField,
    password: TextInputField,
    email_touched: bool,
    password_touched: bool,
    submitting: bool,
    focus: LoginFocus,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        let mut email = TextInputField::new("Email").placeholder("you@example.com");
        email.set_focused(true);
        let password = TextInputField::new("Password")
            .password()
            .placeholder("Enter your password");

        Self {
            email,
            password,
            email_touched: false,
            password_touched: false,
            submitting: false,
            focus: LoginFocus::Email,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.value()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.value()
    }

    #[must_use]
    pub const fn focus(&self) -> LoginFocus {
        self.focus
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn error(&self, field: LoginField) -> Option<&str> {
        self.field(field).error()
    }

    #[must_use]
    pub const fn is_touched(&self, field: LoginField) -> bool {
        match field {
            LoginField::Email => self.email_touched,
            LoginField::Password => self.password_touched,
        }
    }

    /// Moves focus. Leaving a text field marks it touched.
    pub fn set_focus(&mut self, focus: LoginFocus) {
        if focus == self.focus {
            return;
        }
        if let Some(field) = self.focus.field() {
            self.touch(field);
        }
        self.focus = focus;
        self.email.set_focused(focus == LoginFocus::Email);
        self.password.set_focused(focus == LoginFocus::Password);
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    /// Applies an editing key to the focused field and revalidates every
    /// touched field. Returns true if handled.
    pub fn edit(&mut self, key: KeyEvent) -> bool {
        let Some(field) = self.focus.field() else {
            return false;
        };
        let input = self.field_mut(field);
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                input.input_char(c);
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            _ => return false,
        }
        for touched in [LoginField::Email, LoginField::Password] {
            if self.is_touched(touched) {
                self.validate(touched);
            }
        }
        true
    }

    /// Marks a field touched and shows its current error.
    pub fn touch(&mut self, field: LoginField) {
        match field {
            LoginField::Email => self.email_touched = true,
            LoginField::Password => self.password_touched = true,
        }
        self.validate(field);
    }

    /// Touches every field and, if all are valid, enters the submitting
    /// state and returns the credentials to send.
    ///
    /// Returns `None` while a submit is already running.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.touch(LoginField::Email);
        self.touch(LoginField::Password);
        if self.email.error().is_some() || self.password.error().is_some() {
            return None;
        }
        self.submitting = true;
        Some(Credentials::new(self.email.value(), self.password.value()))
    }

    /// Leaves the submitting state and shows `errors`.
    pub fn finish_submit(&mut self, errors: LoginFieldErrors) {
        self.submitting = false;
        self.email.set_error(errors.email);
        self.password.set_error(errors.password);
    }

    fn validate(&mut self, field: LoginField) {
        let error = match field {
            LoginField::Email => email_rules().validate(self.email.value()),
            LoginField::Password => password_rules().validate(self.password.value()),
        };
        self.field_mut(field).set_error(error.map(str::to_string));
    }

    const fn field(&self, field: LoginField) -> &TextInputField {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    const fn field_mut(&mut self, field: LoginField) -> &mut TextInputField {
        match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submitted,
    SignUp,
}

#[derive(Debug, Default, Clone, Copy)]
struct HitAreas {
    email: Rect,
    password: Rect,
    submit: Rect,
    sign_up: Rect,
}

/// Login form bound to the login use case.
pub struct LoginScreen {
    form: LoginForm,
    use_case: LoginUseCase,
    action_tx: mpsc::UnboundedSender<AppAction>,
    pending: Option<PendingSubmit>,
    next_submission_id: u64,
    status: Option<StatusMessage>,
    theme: Theme,
    hit_areas: HitAreas,
}

impl LoginScreen {
    #[must_use]
    pub fn new(
        use_case: LoginUseCase,
        action_tx: mpsc::UnboundedSender<AppAction>,
        theme: Theme,
    ) -> Self {
        Self {
            form: LoginForm::new(),
            use_case,
            action_tx,
            pending: None,
            next_submission_id: 1,
            status: None,
            theme,
            hit_areas: HitAreas::default(),
        }
    }

    #[must_use]
    pub const fn form(&self) -> &LoginForm {
        &self.form
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.form.is_submitting()
    }

    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn hints(&self) -> &'static str {
        "Tab: Next field | Enter: Sign in | Esc: Quit"
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                LoginAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                LoginAction::None
            }
            KeyCode::Enter => match self.form.focus() {
                LoginFocus::Email => {
                    self.form.focus_next();
                    LoginAction::None
                }
                LoginFocus::Password | LoginFocus::Submit => self.submit(),
            },
            _ => {
                self.form.edit(key);
                LoginAction::None
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> LoginAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return LoginAction::None;
        }
        let position = Position::new(mouse.column, mouse.row);
        let areas = self.hit_areas;

        if areas.email.contains(position) {
            self.form.set_focus(LoginFocus::Email);
        } else if areas.password.contains(position) {
            self.form.set_focus(LoginFocus::Password);
        } else if areas.submit.contains(position) {
            self.form.set_focus(LoginFocus::Submit);
            return self.submit();
        } else if areas.sign_up.contains(position) {
            debug!("Sign up pressed");
            self.status = Some(StatusMessage::info("Sign up is not available yet"));
            return LoginAction::SignUp;
        }
        LoginAction::None
    }

    /// Applies a finished submit. Returns the signed-in email on success.
    ///
    /// Results from a submit other than the pending one are ignored.
    pub fn on_login_finished(
        &mut self,
        submission_id: u64,
        result: Result<LoginOutcome, AuthError>,
    ) -> Option<String> {
        if self.pending.as_ref().map(PendingSubmit::id) != Some(submission_id) {
            debug!(submission_id, "Ignoring stale login result");
            return None;
        }
        self.pending = None;

        match result {
            Ok(LoginOutcome::Success { email }) => {
                self.form.finish_submit(LoginFieldErrors::default());
                self.status = Some(StatusMessage::success("Login successful!"));
                Some(email)
            }
            Ok(outcome) => {
                self.form.finish_submit(outcome.field_errors());
                self.status = None;
                None
            }
            Err(e) => {
                self.form.finish_submit(LoginFieldErrors::default());
                self.status = Some(StatusMessage::error(e.to_string()));
                None
            }
        }
    }

    fn submit(&mut self) -> LoginAction {
        let Some(credentials) = self.form.begin_submit() else {
            return LoginAction::None;
        };

        let submission_id = self.next_submission_id;
        self.next_submission_id += 1;
        self.status = None;
        info!(submission_id, email = %credentials.email(), "Submitting login");

        let use_case = self.use_case.clone();
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let result = use_case.execute(credentials).await;
            if tx
                .send(AppAction::LoginFinished {
                    submission_id,
                    result,
                })
                .is_err()
            {
                warn!(submission_id, "Login result dropped, event loop closed");
            }
        });
        self.pending = Some(PendingSubmit::new(submission_id, handle));
        LoginAction::Submitted
    }

    fn render_inner(&mut self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2 + FIELD_HEIGHT * 2 + 1 + BUTTON_HEIGHT + 2),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, column, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(FORM_WIDTH.min(area.width)),
            Constraint::Fill(1),
        ])
        .areas(center);

        let [title, _, email, password, _, submit, _, sign_up] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(column);

        Paragraph::new(TITLE)
            .style(
                self.theme
                    .base_style
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .render(title, buf);

        let input_style = TextInputStyle::from_theme(&self.theme);
        TextInput::new(&self.form.email)
            .style(input_style)
            .render(email, buf);
        TextInput::new(&self.form.password)
            .style(input_style)
            .render(password, buf);

        let label = if self.form.is_submitting() {
            SIGNING_IN_LABEL
        } else {
            SIGN_IN_LABEL
        };
        PrimaryButton::new(label)
            .disabled(self.form.is_submitting())
            .focused(self.form.focus() == LoginFocus::Submit)
            .style(PrimaryButtonStyle::from_theme(&self.theme))
            .render(submit, buf);

        let prompt_width = SIGN_UP_PROMPT.len() as u16;
        let link_width = SIGN_UP_LINK.len() as u16;
        let row_width = (prompt_width + link_width).min(sign_up.width);
        let row_x = sign_up.x + (sign_up.width - row_width) / 2;
        Paragraph::new(Line::from(vec![
            Span::styled(SIGN_UP_PROMPT, self.theme.dimmed_style),
            Span::styled(
                SIGN_UP_LINK,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(sign_up, buf);

        self.hit_areas = HitAreas {
            email,
            password,
            submit,
            sign_up: Rect::new(
                row_x + prompt_width.min(row_width),
                sign_up.y,
                link_width.min(row_width.saturating_sub(prompt_width)),
                sign_up.height,
            ),
        };
    }
}

impl Widget for &mut LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::application::dto::INVALID_CREDENTIALS_MESSAGE;
    use crate::infrastructure::auth::DemoAuthenticator;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn screen() -> (LoginScreen, mpsc::UnboundedReceiver<AppAction>) {
        let auth = Arc::new(DemoAuthenticator::new(Duration::from_millis(800)));
        let (tx, rx) = mpsc::unbounded_channel();
        let screen = LoginScreen::new(LoginUseCase::new(auth), tx, Theme::default());
        (screen, rx)
    }

    fn fill(screen: &mut LoginScreen, email: &str, password: &str) {
        type_text(screen, email);
        screen.handle_key(key(KeyCode::Tab));
        type_text(screen, password);
    }

    fn render(screen: &mut LoginScreen) -> Buffer {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        Widget::render(&mut *screen, area, &mut buf);
        buf
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = LoginForm::new();
        form.edit(key(KeyCode::Char('x')));
        assert!(form.error(LoginField::Email).is_none());

        form.focus_next();
        assert!(form.is_touched(LoginField::Email));
        assert_eq!(
            form.error(LoginField::Email),
            Some("Please enter a valid email address")
        );
        assert!(form.error(LoginField::Password).is_none());
    }

    #[test]
    fn test_touched_field_revalidates_while_typing() {
        let mut form = LoginForm::new();
        form.touch(LoginField::Email);
        assert_eq!(form.error(LoginField::Email), Some("Email is required"));

        for c in "demo@example.com".chars() {
            form.edit(key(KeyCode::Char(c)));
        }
        assert!(form.error(LoginField::Email).is_none());
    }

    #[test]
    fn test_editing_clears_rejected_errors_on_both_fields() {
        let mut form = LoginForm::new();
        for c in "demo@example.com".chars() {
            form.edit(key(KeyCode::Char(c)));
        }
        form.focus_next();
        for c in "Password2".chars() {
            form.edit(key(KeyCode::Char(c)));
        }
        form.focus_next();
        assert!(form.begin_submit().is_some());
        form.finish_submit(LoginFieldErrors::invalid_credentials());
        assert!(form.error(LoginField::Password).is_some());

        // Tab wraps from the button to the email field without a blur.
        form.focus_next();
        assert_eq!(form.focus(), LoginFocus::Email);
        form.edit(key(KeyCode::Backspace));

        assert!(form.error(LoginField::Email).is_none());
        assert!(form.error(LoginField::Password).is_none());
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = LoginForm::new();
        assert_eq!(form.focus(), LoginFocus::Email);
        form.focus_next();
        assert_eq!(form.focus(), LoginFocus::Password);
        form.focus_next();
        assert_eq!(form.focus(), LoginFocus::Submit);
        form.focus_next();
        assert_eq!(form.focus(), LoginFocus::Email);
        form.focus_prev();
        assert_eq!(form.focus(), LoginFocus::Submit);
    }

    #[tokio::test]
    async fn test_invalid_submit_shows_errors_without_request() {
        let (mut screen, mut rx) = screen();
        fill(&mut screen, "demo@example.com", "short1");

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
        assert!(!screen.is_submitting());
        assert_eq!(
            screen.form().error(LoginField::Password),
            Some("Password must be at least 8 characters")
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_login() {
        let (mut screen, mut rx) = screen();
        fill(&mut screen, "demo@example.com", "Password1");

        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            LoginAction::Submitted
        );
        assert!(screen.is_submitting());
        assert!(text(&render(&mut screen)).contains(SIGNING_IN_LABEL));

        // A second press while submitting is ignored.
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);

        let Some(AppAction::LoginFinished {
            submission_id,
            result,
        }) = rx.recv().await
        else {
            panic!("expected login result");
        };
        let email = screen.on_login_finished(submission_id, result);

        assert_eq!(email.as_deref(), Some("demo@example.com"));
        assert!(!screen.is_submitting());
        assert!(text(&render(&mut screen)).contains(SIGN_IN_LABEL));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_login_sets_field_errors() {
        let (mut screen, mut rx) = screen();
        fill(&mut screen, "demo@example.com", "Password2");
        screen.handle_key(key(KeyCode::Enter));

        let Some(AppAction::LoginFinished {
            submission_id,
            result,
        }) = rx.recv().await
        else {
            panic!("expected login result");
        };

        assert!(screen.on_login_finished(submission_id, result).is_none());
        assert!(!screen.is_submitting());
        assert_eq!(
            screen.form().error(LoginField::Email),
            Some(INVALID_CREDENTIALS_MESSAGE)
        );
        assert!(screen.form().error(LoginField::Password).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_ignored() {
        let (mut screen, _rx) = screen();
        fill(&mut screen, "demo@example.com", "Password1");
        screen.handle_key(key(KeyCode::Enter));

        let stale = Ok(LoginOutcome::Success {
            email: "demo@example.com".to_string(),
        });
        assert!(screen.on_login_finished(999, stale).is_none());
        assert!(screen.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_screen_cancels_submit() {
        let (mut screen, mut rx) = screen();
        fill(&mut screen, "demo@example.com", "Password1");
        screen.handle_key(key(KeyCode::Enter));

        drop(screen);

        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_render_shows_form() {
        let (mut screen, _rx) = screen();
        let content = text(&render(&mut screen));

        assert!(content.contains(TITLE));
        assert!(content.contains("you@example.com"));
        assert!(content.contains("Enter your password"));
        assert!(content.contains(SIGN_IN_LABEL));
        assert!(content.contains("Don't have an account? Sign up"));
    }

    #[test]
    fn test_click_sign_up() {
        let (mut screen, _rx) = screen();
        render(&mut screen);
        let area = screen.hit_areas.sign_up;

        let action = screen.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 1,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(action, LoginAction::SignUp);
        assert!(screen.status().is_some());
    }
}
