//! Product card tile.

use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{Resize, StatefulImage};

use crate::domain::entities::{ImageStatus, Product};
use crate::presentation::theme::Theme;

use super::stars::{StarStyle, render_stars};

pub const ADD_TO_CART_LABEL: &str = "[ Add to Cart ]";
pub const IMAGE_UNAVAILABLE: &str = "Image not available";
const TITLE_LINES: u16 = 2;
const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Text exposed to assistive output for an interactive element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityInfo {
    pub label: String,
    pub hint: String,
}

impl AccessibilityInfo {
    #[must_use]
    pub fn for_card(product: &Product) -> Self {
        Self {
            label: format!(
                "Product: {}, Price: {}, Rating: {} stars",
                product.title(),
                product.display_price(),
                product.rating().rate
            ),
            hint: "Double tap to view product details".to_string(),
        }
    }

    #[must_use]
    pub fn for_add_to_cart(product: &Product) -> Self {
        Self {
            label: format!("Add {} to cart", product.title()),
            hint: "Double tap to add this product to your cart".to_string(),
        }
    }
}

impl std::fmt::Display for AccessibilityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.label, self.hint)
    }
}

/// Part of a card under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHit {
    Body,
    AddToCart,
}

/// Which part of a card has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFocus {
    Body,
    AddToCart,
}

/// Image state of a mounted card. Created on mount, dropped on unmount.
pub struct CardImageState {
    mount_id: u64,
    url: String,
    status: ImageStatus,
    protocol: Option<StatefulProtocol>,
}

impl CardImageState {
    #[must_use]
    pub fn new(mount_id: u64, url: impl Into<String>) -> Self {
        Self {
            mount_id,
            url: url.into(),
            status: ImageStatus::Loading,
            protocol: None,
        }
    }

    #[must_use]
    pub const fn mount_id(&self) -> u64 {
        self.mount_id
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn status(&self) -> &ImageStatus {
        &self.status
    }

    /// Stores a decoded image. Ignored once the load has failed.
    pub fn set_loaded(&mut self, image: &Arc<image::DynamicImage>, picker: &Picker) {
        if self.status.is_failed() {
            return;
        }
        self.protocol = Some(picker.new_resize_protocol((**image).clone()));
        self.status = ImageStatus::Ready;
    }

    /// Marks the image as failed for the rest of this mount.
    pub fn set_failed(&mut self, error: impl Into<String>) {
        self.protocol = None;
        self.status = ImageStatus::Failed(error.into());
    }
}

impl std::fmt::Debug for CardImageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardImageState")
            .field("mount_id", &self.mount_id)
            .field("url", &self.url)
            .field("status", &self.status)
            .field("has_protocol", &self.protocol.is_some())
            .finish()
    }
}

/// Areas of a card, relative to the card's own rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub outer: Rect,
    pub image: Rect,
    pub title: Rect,
    pub rating: Rect,
    pub price: Rect,
    pub button: Rect,
}

impl CardLayout {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(outer: Rect) -> Self {
        let inner = Rect::new(
            outer.x.saturating_add(1),
            outer.y.saturating_add(1),
            outer.width.saturating_sub(2),
            outer.height.saturating_sub(2),
        );

        // Bottom-up: button, rating, price, two title lines; image takes the rest.
        let bottom = inner.bottom();
        let row = |from_bottom: u16, height: u16| {
            let y = bottom.saturating_sub(from_bottom).max(inner.y);
            Rect::new(inner.x, y, inner.width, height.min(bottom.saturating_sub(y)))
        };

        let button_row = row(1, 1);
        let rating = row(2, 1);
        let price = row(3, 1);
        let title = row(3 + TITLE_LINES, TITLE_LINES);
        let image_height = inner.height.saturating_sub(3 + TITLE_LINES);
        let image = Rect::new(inner.x, inner.y, inner.width, image_height);

        let label_width = (ADD_TO_CART_LABEL.chars().count() as u16).min(button_row.width);
        let button = Rect::new(
            button_row.x + (button_row.width - label_width) / 2,
            button_row.y,
            label_width,
            button_row.height,
        );

        Self {
            outer,
            image,
            title,
            rating,
            price,
            button,
        }
    }

    /// Resolves a pointer position. The nested button wins over the body.
    #[must_use]
    pub fn hit(&self, position: Position) -> Option<CardHit> {
        if self.button.contains(position) {
            Some(CardHit::AddToCart)
        } else if self.outer.contains(position) {
            Some(CardHit::Body)
        } else {
            None
        }
    }
}

pub struct ProductCardStyle {
    pub border: Style,
    pub border_focused: Style,
    pub title: Style,
    pub price: Style,
    pub button: Style,
    pub button_focused: Style,
    pub placeholder: Style,
    pub image_error: Style,
    pub stars: StarStyle,
}

impl ProductCardStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            border: theme.border_style,
            border_focused: theme.focused_border_style,
            title: Style::default().add_modifier(Modifier::BOLD),
            price: Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
            button: Style::default().fg(theme.accent),
            button_focused: Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
            placeholder: theme.dimmed_style,
            image_error: theme.dimmed_style.add_modifier(Modifier::ITALIC),
            stars: StarStyle::from_theme(theme),
        }
    }
}

/// Renders one product. Image state lives in [`CardImageState`].
pub struct ProductCard<'a> {
    product: &'a Product,
    style: &'a ProductCardStyle,
    focus: Option<CardFocus>,
    show_image: bool,
    draw_protocol: bool,
    spinner_frame: usize,
}

impl<'a> ProductCard<'a> {
    #[must_use]
    pub const fn new(product: &'a Product, style: &'a ProductCardStyle) -> Self {
        Self {
            product,
            style,
            focus: None,
            show_image: true,
            draw_protocol: true,
            spinner_frame: 0,
        }
    }

    #[must_use]
    pub const fn focus(mut self, focus: Option<CardFocus>) -> Self {
        self.focus = focus;
        self
    }

    /// Replaces the image with a static placeholder when false.
    #[must_use]
    pub const fn show_image(mut self, show: bool) -> Self {
        self.show_image = show;
        self
    }

    /// Skips terminal graphics, e.g. for partially visible cards drawn
    /// into a scratch buffer.
    #[must_use]
    pub const fn draw_protocol(mut self, draw: bool) -> Self {
        self.draw_protocol = draw;
        self
    }

    #[must_use]
    pub const fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    fn render_image(&self, area: Rect, buf: &mut Buffer, state: &mut CardImageState) {
        if area.is_empty() {
            return;
        }
        let centered = |text: String, style: Style| {
            Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
        };
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);

        if !self.show_image {
            centered("▣".to_string(), self.style.placeholder).render(middle, buf);
            return;
        }

        match (&state.status, state.protocol.as_mut()) {
            (ImageStatus::Ready, Some(protocol)) if self.draw_protocol => {
                StatefulImage::default()
                    .resize(Resize::Fit(None))
                    .render(area, buf, protocol);
            }
            (ImageStatus::Failed(_), _) => {
                centered(IMAGE_UNAVAILABLE.to_string(), self.style.image_error)
                    .render(middle, buf);
            }
            (ImageStatus::Ready, _) => {
                centered("▣".to_string(), self.style.placeholder).render(middle, buf);
            }
            (ImageStatus::Loading, _) => {
                let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
                centered(frame.to_string(), self.style.placeholder).render(middle, buf);
            }
        }
    }
}

impl StatefulWidget for ProductCard<'_> {
    type State = CardImageState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        let layout = CardLayout::new(area);

        let border = if self.focus.is_some() {
            self.style.border_focused
        } else {
            self.style.border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .render(area, buf);

        self.render_image(layout.image, buf, state);

        Paragraph::new(self.product.title())
            .style(self.style.title)
            .wrap(Wrap { trim: true })
            .render(layout.title, buf);

        Paragraph::new(render_stars(self.product.rating().rate, &self.style.stars))
            .render(layout.rating, buf);

        Paragraph::new(Line::from(Span::styled(
            self.product.display_price(),
            self.style.price,
        )))
        .render(layout.price, buf);

        let button_style = if self.focus == Some(CardFocus::AddToCart) {
            self.style.button_focused
        } else {
            self.style.button
        };
        Paragraph::new(ADD_TO_CART_LABEL)
            .style(button_style)
            .render(layout.button, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::product::fixtures::sample_products;

    fn render_card(product: &Product, state: &mut CardImageState, area: Rect) -> Buffer {
        let style = ProductCardStyle::from_theme(&Theme::default());
        let mut buf = Buffer::empty(area);
        ProductCard::new(product, &style).render(area, &mut buf, state);
        buf
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_accessibility_labels() {
        let product = &sample_products()[0];
        let card = AccessibilityInfo::for_card(product);
        assert_eq!(
            card.label,
            "Product: Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops, Price: $109.95, Rating: 3.9 stars"
        );
        assert_eq!(card.hint, "Double tap to view product details");

        let button = AccessibilityInfo::for_add_to_cart(product);
        assert_eq!(
            button.label,
            "Add Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops to cart"
        );
        assert_eq!(button.hint, "Double tap to add this product to your cart");
    }

    #[test]
    fn test_layout_stacks_sections() {
        let layout = CardLayout::new(Rect::new(0, 0, 30, 11));
        assert_eq!(layout.button.y, 9);
        assert_eq!(layout.rating.y, 8);
        assert_eq!(layout.price.y, 7);
        assert_eq!(layout.title, Rect::new(1, 5, 28, 2));
        assert_eq!(layout.image, Rect::new(1, 1, 28, 4));
        assert_eq!(layout.button.width, 15);
    }

    #[test]
    fn test_button_hit_wins_over_body() {
        let layout = CardLayout::new(Rect::new(10, 5, 30, 11));
        let button = Position::new(layout.button.x + 1, layout.button.y);
        assert_eq!(layout.hit(button), Some(CardHit::AddToCart));
        assert_eq!(layout.hit(Position::new(12, 7)), Some(CardHit::Body));
        assert_eq!(layout.hit(Position::new(9, 7)), None);
    }

    #[test]
    fn test_render_loading_card() {
        let products = sample_products();
        let mut state = CardImageState::new(1, products[1].image());
        let buf = render_card(&products[1], &mut state, Rect::new(0, 0, 30, 11));
        let rendered = text(&buf);

        assert!(rendered.contains("Mens Casual Premium Slim"));
        assert!(rendered.contains("$22.3"));
        assert!(rendered.contains("★★★★☆ (4.1)"));
        assert!(rendered.contains(ADD_TO_CART_LABEL));
        assert!(rendered.contains(SPINNER_FRAMES[0]));

        let line_of = |needle: &str| rendered.lines().position(|line| line.contains(needle));
        let title = line_of("Mens Casual Premium Slim");
        let price = line_of("$22.3");
        let stars = line_of("★★★★☆");
        let button = line_of(ADD_TO_CART_LABEL);
        assert!(title < price && price < stars && stars < button);
    }

    #[test]
    fn test_failed_image_stays_failed() {
        let products = sample_products();
        let mut state = CardImageState::new(1, products[0].image());
        state.set_failed("HTTP 404");
        state.set_loaded(
            &Arc::new(image::DynamicImage::new_rgb8(2, 2)),
            &Picker::halfblocks(),
        );

        assert!(state.status().is_failed());
        let rendered = text(&render_card(&products[0], &mut state, Rect::new(0, 0, 30, 11)));
        assert!(rendered.contains(IMAGE_UNAVAILABLE));
    }

    #[test]
    fn test_loaded_image_is_ready() {
        let mut state = CardImageState::new(4, "a.png");
        state.set_loaded(
            &Arc::new(image::DynamicImage::new_rgb8(8, 8)),
            &Picker::halfblocks(),
        );
        assert!(state.status().is_ready());
        assert_eq!(state.mount_id(), 4);
    }
}
