use super::adapter::ColorConverter;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Colours shared by every screen, built once from config at the root.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    /// Text drawn on top of the accent colour.
    pub on_accent: Color,
    pub base_style: Style,
    pub dimmed_style: Style,
    pub selection_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
    pub star: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("#007AFF")
    }
}

impl Theme {
    #[must_use]
    pub fn new(accent_color_str: &str) -> Self {
        Self::from_color(parse_color(accent_color_str))
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let selection_bg = ColorConverter::shade(accent, 0.2, 0.3);
        let disabled = ColorConverter::shade(accent, 0.45, 0.15);

        Self {
            accent,
            on_accent: ColorConverter::contrast_text(accent),
            base_style: Style::default().fg(Color::Reset),
            dimmed_style: Style::default().fg(Color::DarkGray),
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            border_style: Style::default().fg(Color::Gray),
            focused_border_style: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD),
            error: Color::Rgb(255, 59, 48),
            success: Color::Rgb(52, 199, 89),
            warning: Color::Rgb(255, 149, 0),
            star: Color::Rgb(255, 215, 0),
            disabled,
        }
    }
}

fn parse_color(s: &str) -> Color {
    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Blue,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match s.len() {
        6 => Some((channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?)),
        3 => Some((
            channel(&s[0..1].repeat(2))?,
            channel(&s[1..2].repeat(2))?,
            channel(&s[2..3].repeat(2))?,
        )),
        _ => None,
    }
}
