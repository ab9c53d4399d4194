//! Full-width primary action button.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

/// Rows taken by a bordered button.
pub const BUTTON_HEIGHT: u16 = 3;

pub struct PrimaryButtonStyle {
    pub enabled: Style,
    pub focused: Style,
    pub disabled: Style,
}

impl PrimaryButtonStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            enabled: Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
            focused: Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            disabled: Style::default().bg(theme.disabled).fg(theme.on_accent),
        }
    }
}

pub struct PrimaryButton<'a> {
    label: &'a str,
    disabled: bool,
    focused: bool,
    style: PrimaryButtonStyle,
}

impl<'a> PrimaryButton<'a> {
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            disabled: false,
            focused: false,
            style: PrimaryButtonStyle::from_theme(&Theme::default()),
        }
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn style(mut self, style: PrimaryButtonStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for PrimaryButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.disabled {
            self.style.disabled
        } else if self.focused {
            self.style.focused
        } else {
            self.style.enabled
        };

        buf.set_style(area, style);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(self.label))
            .style(style)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
