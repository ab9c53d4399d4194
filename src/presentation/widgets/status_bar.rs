//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::theme::Theme;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    /// Informational.
    #[default]
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self, theme: &Theme) -> Color {
        match self {
            Self::Info => theme.accent,
            Self::Success => theme.success,
            Self::Warning => theme.warning,
            Self::Error => theme.error,
        }
    }
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    #[must_use]
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Info)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Success)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error)
    }
}

/// Bottom line: message on the left, key hints on the right.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    left: String,
    right: String,
    level: StatusLevel,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
            theme,
        }
    }

    #[must_use]
    pub fn message(mut self, message: Option<&StatusMessage>) -> Self {
        if let Some(message) = message {
            self.left = message.text.clone();
            self.level = message.level;
        }
        self
    }

    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = Style::default()
            .fg(self.level.color(self.theme))
            .add_modifier(Modifier::BOLD);

        let width = usize::from(area.width);
        let right_width = self.right.width();
        let padding = width.saturating_sub(self.left.width() + right_width);

        let mut spans = vec![Span::styled(self.left, style)];
        if padding > 0 && !self.right.is_empty() {
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(self.right, self.theme.dimmed_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_and_right_aligned() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme)
            .message(Some(&StatusMessage::success("Added")))
            .right("q: quit")
            .render(area, &mut buf);

        let line: String = (0..30).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.starts_with("Added"));
        assert!(line.ends_with("q: quit"));
        assert_eq!(buf[(0, 0)].fg, theme.success);
    }

    #[test]
    fn test_right_hint_dropped_when_too_narrow() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme)
            .left("Refreshing catalog")
            .right("r: refresh")
            .render(area, &mut buf);

        let line: String = (0..10).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(line, "Refreshing");
    }
}
