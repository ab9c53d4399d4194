//! Two-column, virtualized product grid.
//!
//! The grid renders borrowed products and reports user intent as
//! [`ProductGridAction`]s. Fetching, debouncing and cart handling belong to
//! the screen that owns the data.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use ratatui_image::picker::Picker;
use tracing::{debug, trace};

use crate::domain::entities::{LoadedImage, Product, ProductId};
use crate::domain::errors::ImageError;
use crate::infrastructure::config::GridConfig;
use crate::presentation::theme::Theme;

use super::product_card::{
    AccessibilityInfo, CardFocus, CardHit, CardImageState, CardLayout, ProductCard,
    ProductCardStyle,
};
use super::virtual_window::{COLUMNS, Viewport, VirtualWindow};

pub const EMPTY_MESSAGE: &str = "No products available";
pub const LOADING_MORE_MESSAGE: &str = "Loading more products...";
pub const REFRESHING_MESSAGE: &str = "Refreshing...";

/// Lines scrolled per mouse wheel notch.
const WHEEL_STEP: usize = 3;
/// Blank lines between card rows.
const ROW_GAP: u16 = 1;
const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Width of one column for a viewport `width` cells wide.
#[must_use]
pub const fn column_width(width: u16, outer_padding: u16, column_gap: u16) -> u16 {
    width.saturating_sub(outer_padding.saturating_mul(2).saturating_add(column_gap)) / 2
}

/// Flags supplied by the data owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridProps {
    /// A next page is being fetched.
    pub loading: bool,
    /// A refresh is in flight.
    pub refreshing: bool,
    /// Pull-to-refresh is offered.
    pub refresh_enabled: bool,
    /// End-reached signals are emitted.
    pub load_more_enabled: bool,
}

/// Intent reported by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductGridAction {
    PressProduct(ProductId),
    AddToCart(ProductId),
    Refresh,
    LoadMore,
}

/// Image load wanted by a freshly mounted card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub mount_id: u64,
    pub url: String,
}

/// Screen geometry of a card drawn in the last frame.
#[derive(Debug, Clone, Copy)]
struct RenderedCard {
    index: usize,
    id: ProductId,
    x: u16,
    /// Screen row of the card's top edge; negative when scrolled past.
    top: i32,
    width: u16,
    height: u16,
    visible: Rect,
}

impl RenderedCard {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn hit(&self, position: Position) -> Option<CardHit> {
        if !self.visible.contains(position) {
            return None;
        }
        let local = Position::new(
            position.x - self.x,
            (i32::from(position.y) - self.top) as u16,
        );
        CardLayout::new(Rect::new(0, 0, self.width, self.height)).hit(local)
    }
}

/// Grid state owned by the screen: scroll, focus and mounted cards.
pub struct GridState {
    window: VirtualWindow,
    config: GridConfig,
    scroll: usize,
    viewport: Rect,
    item_count: usize,
    focus: Option<(usize, CardFocus)>,
    mounted: HashMap<ProductId, CardImageState>,
    next_mount_id: u64,
    image_requests: Vec<ImageRequest>,
    unmounted: Vec<u64>,
    rendered: Vec<RenderedCard>,
    end_check_due: bool,
    content_height: usize,
    spinner_frame: usize,
}

impl std::fmt::Debug for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridState")
            .field("scroll", &self.scroll)
            .field("viewport", &self.viewport)
            .field("item_count", &self.item_count)
            .field("focus", &self.focus)
            .field("mounted", &self.mounted.len())
            .finish_non_exhaustive()
    }
}

impl GridState {
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            window: VirtualWindow::new(&config),
            config,
            scroll: 0,
            viewport: Rect::default(),
            item_count: 0,
            focus: None,
            mounted: HashMap::new(),
            next_mount_id: 1,
            image_requests: Vec::new(),
            unmounted: Vec::new(),
            rendered: Vec::new(),
            end_check_due: false,
            content_height: 0,
            spinner_frame: 0,
        }
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll
    }

    #[must_use]
    pub const fn focus(&self) -> Option<(usize, CardFocus)> {
        self.focus
    }

    /// Number of mounted cards.
    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    #[must_use]
    pub fn card_image(&self, id: ProductId) -> Option<&CardImageState> {
        self.mounted.get(&id)
    }

    /// Scrolls to the top and unmounts every card, for replaced content.
    pub fn reset(&mut self) {
        self.scroll = 0;
        self.focus = None;
        self.window.reset();
        self.unmount_all();
        self.end_check_due = true;
    }

    /// Advances spinner animations.
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Image loads requested by cards mounted since the last call.
    pub fn take_image_requests(&mut self) -> Vec<ImageRequest> {
        std::mem::take(&mut self.image_requests)
    }

    /// Mount ids of cards unmounted since the last call.
    pub fn take_unmounted(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.unmounted)
    }

    /// Routes an image result to the card mounted under `mount_id`.
    ///
    /// Returns false if that card is gone; the result is dropped.
    pub fn apply_image(
        &mut self,
        mount_id: u64,
        result: &Result<LoadedImage, ImageError>,
        picker: &Picker,
    ) -> bool {
        let Some(card) = self
            .mounted
            .values_mut()
            .find(|card| card.mount_id() == mount_id)
        else {
            trace!(mount_id, "Dropping image for unmounted card");
            return false;
        };

        match result {
            Ok(loaded) => card.set_loaded(&loaded.image, picker),
            Err(e) => card.set_failed(e.to_string()),
        }
        true
    }

    /// Accessibility text of the focused element.
    #[must_use]
    pub fn focused_accessibility(&self, products: &[Product]) -> Option<AccessibilityInfo> {
        let (index, part) = self.focus?;
        let product = products.get(index)?;
        Some(match part {
            CardFocus::Body => AccessibilityInfo::for_card(product),
            CardFocus::AddToCart => AccessibilityInfo::for_add_to_cart(product),
        })
    }

    /// Emits `LoadMore` when the viewport is within the end-reached
    /// threshold after a scroll or content change.
    pub fn end_reached(&mut self, props: GridProps) -> Option<ProductGridAction> {
        if !std::mem::take(&mut self.end_check_due) {
            return None;
        }
        if !props.load_more_enabled || self.item_count == 0 {
            return None;
        }

        let viewport_height = usize::from(self.viewport.height);
        let distance = self
            .content_height
            .saturating_sub(self.scroll + viewport_height);
        #[allow(clippy::cast_precision_loss)]
        let reached =
            distance as f64 <= self.config.end_reached_threshold * viewport_height as f64;

        if reached {
            debug!(distance, viewport_height, "End of grid reached");
            Some(ProductGridAction::LoadMore)
        } else {
            None
        }
    }

    /// Handles a key press.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        products: &[Product],
        props: GridProps,
    ) -> Option<ProductGridAction> {
        let count = products.len();
        match key.code {
            KeyCode::Char('r') if props.refresh_enabled => Some(ProductGridAction::Refresh),
            KeyCode::Up if self.at_top_row() && self.scroll == 0 && props.refresh_enabled => {
                Some(ProductGridAction::Refresh)
            }
            KeyCode::Up => self.move_focus(-(COLUMNS as isize), count),
            KeyCode::Down => self.move_focus(COLUMNS as isize, count),
            KeyCode::Left => self.move_focus(-1, count),
            KeyCode::Right => self.move_focus(1, count),
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some((index, part)) = self.focus {
                    let next = match part {
                        CardFocus::Body => CardFocus::AddToCart,
                        CardFocus::AddToCart => CardFocus::Body,
                    };
                    self.focus = Some((index, next));
                }
                None
            }
            KeyCode::Enter => {
                let (index, part) = self.focus?;
                let id = products.get(index)?.id();
                Some(match part {
                    CardFocus::Body => ProductGridAction::PressProduct(id),
                    CardFocus::AddToCart => ProductGridAction::AddToCart(id),
                })
            }
            KeyCode::Char('a') => {
                let (index, _) = self.focus?;
                Some(ProductGridAction::AddToCart(products.get(index)?.id()))
            }
            KeyCode::PageDown => {
                self.scroll_by(usize::from(self.viewport.height) as isize, count);
                None
            }
            KeyCode::PageUp => {
                self.scroll_by(-(usize::from(self.viewport.height) as isize), count);
                None
            }
            KeyCode::Home => {
                self.scroll_by(-(self.scroll as isize), count);
                None
            }
            KeyCode::End => {
                let max = self.window.max_offset(count, usize::from(self.viewport.height));
                self.scroll_by(max as isize - self.scroll as isize, count);
                None
            }
            _ => None,
        }
    }

    /// Handles wheel scrolling and clicks.
    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        products: &[Product],
        props: GridProps,
    ) -> Option<ProductGridAction> {
        let count = products.len();
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_by(WHEEL_STEP as isize, count);
                None
            }
            MouseEventKind::ScrollUp if self.scroll == 0 && props.refresh_enabled => {
                Some(ProductGridAction::Refresh)
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-(WHEEL_STEP as isize), count);
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                let (card, hit) = self
                    .rendered
                    .iter()
                    .find_map(|card| card.hit(position).map(|hit| (*card, hit)))?;
                match hit {
                    CardHit::AddToCart => {
                        self.focus = Some((card.index, CardFocus::AddToCart));
                        Some(ProductGridAction::AddToCart(card.id))
                    }
                    CardHit::Body => {
                        self.focus = Some((card.index, CardFocus::Body));
                        Some(ProductGridAction::PressProduct(card.id))
                    }
                }
            }
            _ => None,
        }
    }

    fn at_top_row(&self) -> bool {
        self.focus.is_none_or(|(index, _)| index < COLUMNS)
    }

    fn first_visible_index(&self) -> usize {
        (self.scroll / self.window.item_height()) * COLUMNS
    }

    fn move_focus(&mut self, delta: isize, count: usize) -> Option<ProductGridAction> {
        if count == 0 {
            return None;
        }
        let next = match self.focus {
            None => self.first_visible_index().min(count - 1),
            Some((index, _)) => {
                let target = index.saturating_add_signed(delta);
                if (delta < 0 && index < delta.unsigned_abs()) || target >= count {
                    index
                } else {
                    target
                }
            }
        };
        self.focus = Some((next, CardFocus::Body));
        self.ensure_visible(next, count);
        None
    }

    fn ensure_visible(&mut self, index: usize, count: usize) {
        let top = self.window.item_offset(index);
        let height = self.window.item_height();
        let viewport_height = usize::from(self.viewport.height);

        let target = if top < self.scroll {
            top
        } else if top + height > self.scroll + viewport_height {
            (top + height).saturating_sub(viewport_height)
        } else {
            self.scroll
        };
        self.scroll_by(target as isize - self.scroll as isize, count);
    }

    fn scroll_by(&mut self, delta: isize, count: usize) {
        let max = self
            .window
            .max_offset(count, usize::from(self.viewport.height));
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
        self.end_check_due = true;
    }

    fn unmount_all(&mut self) {
        self.unmounted
            .extend(self.mounted.drain().map(|(_, card)| card.mount_id()));
        self.rendered.clear();
    }

    /// Mounts cards entering the window and drops those leaving it.
    fn sync_mounted(&mut self, mounted_products: &[Product], load_images: bool) {
        let keep: std::collections::HashSet<ProductId> =
            mounted_products.iter().map(Product::id).collect();

        let leaving: Vec<ProductId> = self
            .mounted
            .keys()
            .filter(|id| !keep.contains(id))
            .copied()
            .collect();
        for id in leaving {
            if let Some(card) = self.mounted.remove(&id) {
                trace!(%id, mount_id = card.mount_id(), "Unmounting card");
                self.unmounted.push(card.mount_id());
            }
        }

        for product in mounted_products {
            if self.mounted.contains_key(&product.id()) {
                continue;
            }
            let mount_id = self.next_mount_id;
            self.next_mount_id += 1;
            trace!(id = %product.id(), mount_id, "Mounting card");
            if load_images {
                self.image_requests.push(ImageRequest {
                    mount_id,
                    url: product.image().to_string(),
                });
            }
            self.mounted
                .insert(product.id(), CardImageState::new(mount_id, product.image()));
        }
    }
}

pub struct ProductGridStyle {
    pub card: ProductCardStyle,
    pub empty: Style,
    pub footer: Style,
    pub refresh_bar: Style,
    pub scrollbar: Style,
}

impl ProductGridStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            card: ProductCardStyle::from_theme(theme),
            empty: theme.dimmed_style.add_modifier(Modifier::ITALIC),
            footer: theme.dimmed_style,
            refresh_bar: Style::default()
                .bg(theme.accent)
                .fg(theme.on_accent)
                .add_modifier(Modifier::BOLD),
            scrollbar: Style::default().fg(theme.accent),
        }
    }
}

/// Renders products into a [`GridState`].
pub struct ProductGrid<'a> {
    products: &'a [Product],
    props: GridProps,
    style: &'a ProductGridStyle,
    show_scrollbar: bool,
    image_preview: bool,
}

impl<'a> ProductGrid<'a> {
    #[must_use]
    pub const fn new(products: &'a [Product], props: GridProps, style: &'a ProductGridStyle) -> Self {
        Self {
            products,
            props,
            style,
            show_scrollbar: false,
            image_preview: true,
        }
    }

    #[must_use]
    pub const fn show_scrollbar(mut self, show: bool) -> Self {
        self.show_scrollbar = show;
        self
    }

    #[must_use]
    pub const fn image_preview(mut self, enabled: bool) -> Self {
        self.image_preview = enabled;
        self
    }

    fn render_status_line(&self, text: &str, frame: usize, style: Style, area: Rect, buf: &mut Buffer) {
        let spinner = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
        Paragraph::new(format!("{spinner} {text}"))
            .style(style)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render_cards(&self, content: Rect, buf: &mut Buffer, state: &mut GridState) {
        let config = state.config;
        let col_width = column_width(content.width, config.outer_padding, config.column_gap);
        let card_height = config.item_height.saturating_sub(ROW_GAP).max(3);
        let viewport_end = state.scroll + usize::from(content.height);

        let range = state.window.update(
            self.products.len(),
            Viewport {
                offset: state.scroll,
                height: usize::from(content.height),
            },
        );
        state.sync_mounted(&self.products[range.clone()], self.image_preview);

        for index in range {
            let product = &self.products[index];
            let offset = state.window.item_offset(index);
            if offset + usize::from(card_height) <= state.scroll || offset >= viewport_end {
                continue;
            }

            let column = (index % COLUMNS) as u16;
            let x = content.x + config.outer_padding + column * (col_width + config.column_gap);
            let top = i32::from(content.y) + offset as i32 - state.scroll as i32;
            let visible = Rect::new(x, top.max(i32::from(content.y)) as u16, col_width, 0);
            let visible_bottom = (top + i32::from(card_height)).min(i32::from(content.bottom()));
            let visible = Rect {
                height: (visible_bottom - i32::from(visible.y)).max(0) as u16,
                ..visible
            };
            if visible.is_empty() {
                continue;
            }

            let focus = state
                .focus
                .filter(|(focused, _)| *focused == index)
                .map(|(_, part)| part);
            let Some(image_state) = state.mounted.get_mut(&product.id()) else {
                continue;
            };
            let card = ProductCard::new(product, &self.style.card)
                .focus(focus)
                .show_image(self.image_preview)
                .spinner_frame(state.spinner_frame);

            if visible.height == card_height && top >= i32::from(content.y) {
                card.render(visible, buf, image_state);
            } else {
                // Partially visible: draw off-screen and copy the visible rows.
                let scratch_area = Rect::new(0, 0, col_width, card_height);
                let mut scratch = Buffer::empty(scratch_area);
                card.draw_protocol(false)
                    .render(scratch_area, &mut scratch, image_state);
                let skip = (i32::from(visible.y) - top) as u16;
                for dy in 0..visible.height {
                    for dx in 0..visible.width {
                        buf[(visible.x + dx, visible.y + dy)] =
                            scratch[(dx, skip + dy)].clone();
                    }
                }
            }

            state.rendered.push(RenderedCard {
                index,
                id: product.id(),
                x,
                top,
                width: col_width,
                height: card_height,
                visible,
            });
        }
    }
}

impl StatefulWidget for ProductGrid<'_> {
    type State = GridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut GridState) {
        state.rendered.clear();
        let mut content = area;

        if self.props.refreshing && content.height > 0 {
            let bar = Rect::new(content.x, content.y, content.width, 1);
            buf.set_style(bar, self.style.refresh_bar);
            self.render_status_line(
                REFRESHING_MESSAGE,
                state.spinner_frame,
                self.style.refresh_bar,
                bar,
                buf,
            );
            content.y += 1;
            content.height -= 1;
        }

        if self.products.is_empty() {
            state.item_count = 0;
            state.content_height = 0;
            state.viewport = content;
            state.focus = None;
            state.scroll = 0;
            state.unmount_all();
            let middle = Rect::new(content.x, content.y + content.height / 2, content.width, 1);
            Paragraph::new(EMPTY_MESSAGE)
                .style(self.style.empty)
                .alignment(Alignment::Center)
                .render(middle.intersection(content), buf);
            return;
        }

        if self.props.loading && content.height > 0 {
            let footer = Rect::new(content.x, content.bottom() - 1, content.width, 1);
            self.render_status_line(
                LOADING_MORE_MESSAGE,
                state.spinner_frame,
                self.style.footer,
                footer,
                buf,
            );
            content.height -= 1;
        }

        let scrollbar_area = if self.show_scrollbar && content.width > 1 {
            content.width -= 1;
            Some(Rect::new(content.right(), content.y, 1, content.height))
        } else {
            None
        };

        let count = self.products.len();
        let content_height = state.window.content_height(count);
        if content_height != state.content_height || content != state.viewport {
            state.end_check_due = true;
        }
        state.item_count = count;
        state.content_height = content_height;
        state.viewport = content;
        state.scroll = state
            .scroll
            .min(state.window.max_offset(count, usize::from(content.height)));
        if let Some((index, _)) = state.focus
            && index >= count
        {
            state.focus = None;
        }

        self.render_cards(content, buf, state);

        if let Some(bar_area) = scrollbar_area {
            let max = state.window.max_offset(count, usize::from(content.height));
            let mut scrollbar_state = ScrollbarState::new(max).position(state.scroll);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(self.style.scrollbar)
                .render(bar_area, buf, &mut scrollbar_state);
        }
    }
}
