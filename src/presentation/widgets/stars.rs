//! Five-slot star rating line.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::domain::rating::{StarBreakdown, rating_caption};
use crate::presentation::theme::Theme;

pub const FILLED_STAR: &str = "★";
pub const EMPTY_STAR: &str = "☆";

pub struct StarStyle {
    pub filled: Style,
    pub half: Style,
    pub empty: Style,
    pub caption: Style,
}

impl StarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            filled: Style::default().fg(theme.star),
            half: Style::default().fg(theme.star).add_modifier(Modifier::BOLD),
            empty: theme.dimmed_style,
            caption: theme.dimmed_style,
        }
    }
}

/// Renders `rate` as filled, half and empty stars followed by `(x.x)`.
#[must_use]
pub fn render_stars(rate: f64, style: &StarStyle) -> Line<'static> {
    let stars = StarBreakdown::from_rate(rate);

    let mut spans = Vec::with_capacity(5);
    if stars.filled > 0 {
        spans.push(Span::styled(
            FILLED_STAR.repeat(usize::from(stars.filled)),
            style.filled,
        ));
    }
    if stars.half > 0 {
        spans.push(Span::styled(EMPTY_STAR, style.half));
    }
    if stars.empty > 0 {
        spans.push(Span::styled(
            EMPTY_STAR.repeat(usize::from(stars.empty)),
            style.empty,
        ));
    }
    spans.push(Span::styled(format!(" {}", rating_caption(rate)), style.caption));

    Line::from(spans)
}
