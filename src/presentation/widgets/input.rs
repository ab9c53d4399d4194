//! Labelled text input with an inline error line.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;
use zeroize::Zeroize;

use crate::presentation::theme::Theme;

/// Rows taken by a field: label, bordered box and error line.
pub const FIELD_HEIGHT: u16 = 5;

const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy)]
pub struct TextInputStyle {
    pub label: Style,
    pub text: Style,
    pub placeholder: Style,
    pub border: Style,
    pub border_focused: Style,
    pub border_error: Style,
    pub error: Style,
    pub cursor: Style,
}

impl TextInputStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            label: Style::default().add_modifier(Modifier::BOLD),
            text: theme.base_style,
            placeholder: theme.dimmed_style,
            border: theme.border_style,
            border_focused: theme.focused_border_style,
            border_error: Style::default().fg(theme.error),
            error: Style::default().fg(theme.error),
            cursor: Style::default().bg(theme.accent).fg(theme.on_accent),
        }
    }
}

impl Default for TextInputStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Controlled text field. The value is owned by the field; validation
/// state is supplied by the form through [`TextInputField::set_error`].
#[derive(Debug, Clone)]
pub struct TextInputField {
    label: String,
    value: String,
    /// Cursor position in chars.
    cursor: usize,
    focused: bool,
    masked: bool,
    placeholder: String,
    error: Option<String>,
}

impl TextInputField {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            cursor: 0,
            focused: false,
            masked: false,
            placeholder: String::new(),
            error: None,
        }
    }

    /// Enables secure entry.
    #[must_use]
    pub fn password(mut self) -> Self {
        self.masked = true;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value.zeroize();
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Sets or clears the error shown under the field.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Inserts character at cursor.
    pub fn input_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn display_text(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn cursor_column(&self) -> usize {
        if self.masked {
            self.cursor
        } else {
            self.value
                .chars()
                .take(self.cursor)
                .collect::<String>()
                .width()
        }
    }
}

impl Drop for TextInputField {
    fn drop(&mut self) {
        if self.masked {
            self.value.zeroize();
        }
    }
}

/// Renders a [`TextInputField`] with a style.
pub struct TextInput<'a> {
    field: &'a TextInputField,
    style: TextInputStyle,
}

impl<'a> TextInput<'a> {
    #[must_use]
    pub fn new(field: &'a TextInputField) -> Self {
        Self {
            field,
            style: TextInputStyle::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: TextInputStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let field = self.field;
        let [label_area, box_area, error_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(field.label.as_str())
            .style(self.style.label)
            .render(label_area, buf);

        let border_style = if field.error.is_some() {
            self.style.border_error
        } else if field.focused {
            self.style.border_focused
        } else {
            self.style.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        let (text, text_style) = if field.value.is_empty() {
            (field.placeholder.clone(), self.style.placeholder)
        } else {
            (field.display_text(), self.style.text)
        };

        // Keep the cursor in view for values wider than the box.
        let column = field.cursor_column();
        let width = usize::from(inner.width);
        let skip = (column + 1).saturating_sub(width);
        let visible: String = if field.value.is_empty() {
            text
        } else {
            text.chars().skip(skip).collect()
        };
        Paragraph::new(Line::styled(visible, text_style)).render(inner, buf);

        if field.focused && inner.width > 0 && inner.height > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = inner.x + (column - skip) as u16;
            if cursor_x < inner.right() {
                buf[(cursor_x, inner.y)].set_style(self.style.cursor);
            }
        }

        if let Some(error) = &field.error {
            Paragraph::new(error.as_str())
                .style(self.style.error)
                .render(error_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_basic() {
        let mut input = TextInputField::new("Email");
        assert!(input.value().is_empty());

        input.input_char('a');
        input.input_char('b');
        assert_eq!(input.value(), "ab");

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_cursor_editing_with_multibyte_chars() {
        let mut input = TextInputField::new("Email");
        input.set_value("é@x");
        input.move_start();
        input.move_right();
        input.input_char('e');
        assert_eq!(input.value(), "ée@x");

        input.move_end();
        input.backspace();
        input.move_start();
        input.delete();
        assert_eq!(input.value(), "e@");
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInputField::new("Password").password();
        input.set_value("secret");

        assert_eq!(input.display_text(), "••••••");
    }

    #[test]
    fn test_render_shows_error_below_box() {
        let mut input = TextInputField::new("Email");
        input.set_value("nope");
        input.set_error(Some("Please enter a valid email address".to_string()));

        let area = Rect::new(0, 0, 40, FIELD_HEIGHT);
        let mut buf = Buffer::empty(area);
        TextInput::new(&input).render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(0).starts_with("Email"));
        assert!(row(2).contains("nope"));
        assert!(row(4).starts_with("Please enter a valid email address"));
    }

    #[test]
    fn test_render_never_shows_password() {
        let mut input = TextInputField::new("Password").password();
        input.set_value("Password1");

        let area = Rect::new(0, 0, 30, FIELD_HEIGHT);
        let mut buf = Buffer::empty(area);
        TextInput::new(&input).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!text.contains("Password1"));
        assert!(text.contains("•••••••••"));
    }
}
