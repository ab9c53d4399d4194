//! Home screen: product grid, cart and catalog paging.

use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use ratatui_image::picker::Picker;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::services::{CatalogFeed, FetchKind};
use crate::application::use_cases::LoadProductsUseCase;
use crate::domain::entities::{Cart, Product, ProductId};
use crate::domain::errors::CatalogError;
use crate::domain::ports::{ImageLoaderPort, PageRequest, ProductPage};
use crate::infrastructure::config::UiConfig;
use crate::infrastructure::image::ImageLoadedEvent;
use crate::presentation::theme::Theme;
use crate::presentation::ui::action::AppAction;
use crate::presentation::ui::task::TaskGuard;
use crate::presentation::widgets::{
    CardFocus, GridProps, GridState, ImageRequest, ProductGrid, ProductGridAction,
    ProductGridStyle, StatusMessage,
};

/// Adapters the home screen loads data through.
#[derive(Clone)]
pub struct HomeDeps {
    /// Without a catalog the grid stays empty and paging is disabled.
    pub load_products: Option<LoadProductsUseCase>,
    /// Without a loader no images are requested.
    pub images: Option<Arc<dyn ImageLoaderPort>>,
    pub picker: Picker,
}

pub struct HomeScreen {
    feed: CatalogFeed,
    cart: Cart,
    grid: GridState,
    style: ProductGridStyle,
    theme: Theme,
    deps: HomeDeps,
    action_tx: mpsc::UnboundedSender<AppAction>,
    fetch: Option<TaskGuard>,
    show_scrollbar: bool,
    signed_in: Option<String>,
    status: Option<StatusMessage>,
    announced: Option<(usize, CardFocus)>,
}

impl HomeScreen {
    #[must_use]
    pub fn new(
        deps: HomeDeps,
        ui: &UiConfig,
        theme: Theme,
        action_tx: mpsc::UnboundedSender<AppAction>,
    ) -> Self {
        Self {
            feed: CatalogFeed::new(ui.page_size),
            cart: Cart::new(),
            grid: GridState::new(ui.grid),
            style: ProductGridStyle::from_theme(&theme),
            theme,
            deps,
            action_tx,
            fetch: None,
            show_scrollbar: ui.show_scrollbar,
            signed_in: None,
            status: None,
            announced: None,
        }
    }

    /// Shows the signed-in account in the header.
    #[must_use]
    pub fn signed_in(mut self, email: Option<String>) -> Self {
        self.signed_in = email;
        self
    }

    /// Starts the initial load.
    pub fn mount(&mut self) {
        if self.deps.load_products.is_none() {
            self.status = Some(StatusMessage::info(
                "No catalog configured (use --catalog <file>)",
            ));
            return;
        }
        self.refresh();
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.feed.products()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn feed(&self) -> &CatalogFeed {
        &self.feed
    }

    #[must_use]
    pub const fn grid(&self) -> &GridState {
        &self.grid
    }

    #[must_use]
    pub const fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn hints(&self) -> &'static str {
        "Arrows: Move | Enter: Open | a: Add to cart | r: Refresh | q: Quit"
    }

    fn props(&self) -> GridProps {
        let has_catalog = self.deps.load_products.is_some();
        GridProps {
            loading: self.feed.is_loading(),
            refreshing: self.feed.is_refreshing(),
            refresh_enabled: has_catalog,
            load_more_enabled: has_catalog && !self.feed.is_exhausted(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let props = self.props();
        let action = self.grid.handle_key(key, self.feed.products(), props);
        self.announce_focus();
        if let Some(action) = action {
            self.apply_action(action);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let props = self.props();
        let action = self.grid.handle_mouse(mouse, self.feed.products(), props);
        self.announce_focus();
        if let Some(action) = action {
            self.apply_action(action);
        }
    }

    pub fn tick(&mut self) {
        self.grid.tick();
    }

    /// Applies a fetched page or a fetch failure.
    pub fn on_page_loaded(&mut self, kind: FetchKind, result: Result<ProductPage, CatalogError>) {
        match result {
            Ok(page) => {
                if self.feed.apply_page(kind, page) && kind == FetchKind::Refresh {
                    self.grid.reset();
                    self.announced = None;
                }
            }
            Err(e) => {
                warn!(?kind, error = %e, "Product fetch failed");
                self.feed.fail(kind);
                self.status = Some(StatusMessage::error(format!(
                    "Failed to load products: {e}"
                )));
            }
        }
    }

    /// Routes a decoded image to its card.
    pub fn on_image_loaded(&mut self, event: &ImageLoadedEvent) {
        self.grid
            .apply_image(event.ticket, &event.result, &self.deps.picker);
    }

    /// Flushes work queued by the last render: image loads for newly
    /// mounted cards, cancellations for unmounted ones and the
    /// end-of-list check.
    pub fn after_render(&mut self) {
        let unmounted = self.grid.take_unmounted();
        let requests = self.grid.take_image_requests();
        if let Some(images) = &self.deps.images {
            for ticket in unmounted {
                images.cancel(ticket);
            }
            for ImageRequest { mount_id, url } in requests {
                images.request(mount_id, url);
            }
        }

        if let Some(action) = self.grid.end_reached(self.props()) {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: ProductGridAction) {
        match action {
            ProductGridAction::PressProduct(id) => {
                let title = self.title_of(id);
                info!(%id, title = %title, "Product pressed");
                self.status = Some(StatusMessage::info(format!("Selected {title}")));
            }
            ProductGridAction::AddToCart(id) => {
                let quantity = self.cart.add(id);
                let title = self.title_of(id);
                info!(%id, quantity, total = self.cart.total_items(), "Added to cart");
                self.status = Some(StatusMessage::success(format!(
                    "Added {title} to cart (x{quantity})"
                )));
            }
            ProductGridAction::Refresh => self.refresh(),
            ProductGridAction::LoadMore => {
                if let Some(request) = self.feed.begin_load_more() {
                    self.spawn_fetch(FetchKind::LoadMore, request);
                }
            }
        }
    }

    fn refresh(&mut self) {
        if self.deps.load_products.is_none() {
            return;
        }
        if let Some(request) = self.feed.begin_refresh() {
            self.spawn_fetch(FetchKind::Refresh, request);
        }
    }

    fn spawn_fetch(&mut self, kind: FetchKind, request: PageRequest) {
        let Some(use_case) = self.deps.load_products.clone() else {
            return;
        };
        debug!(?kind, offset = request.offset, "Spawning product fetch");
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let result = use_case.execute(request).await;
            if tx.send(AppAction::PageLoaded { kind, result }).is_err() {
                warn!(?kind, "Product page dropped, event loop closed");
            }
        });
        // Replacing the guard aborts a superseded fetch.
        self.fetch = Some(TaskGuard::new(handle));
    }

    fn announce_focus(&mut self) {
        let focus = self.grid.focus();
        if focus == self.announced {
            return;
        }
        self.announced = focus;
        if let Some(info) = self.grid.focused_accessibility(self.feed.products()) {
            debug!(%info, "Focus changed");
            self.status = Some(StatusMessage::info(info.to_string()));
        }
    }

    fn title_of(&self, id: ProductId) -> String {
        self.feed
            .products()
            .iter()
            .find(|product| product.id() == id)
            .map_or_else(|| format!("product {id}"), |product| product.title().to_string())
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(area);

        let mut spans = vec![Span::styled(
            " Products",
            self.theme.base_style.add_modifier(Modifier::BOLD),
        )];
        if let Some(email) = &self.signed_in {
            spans.push(Span::styled(
                format!("  signed in as {email}"),
                self.theme.dimmed_style,
            ));
        }
        Paragraph::new(Line::from(spans)).render(left, buf);

        let total = self.cart.total_items();
        let noun = if total == 1 { "item" } else { "items" };
        Paragraph::new(Line::from(Span::styled(
            format!("Cart: {total} {noun} "),
            self.theme.base_style.fg(self.theme.accent),
        )))
        .right_aligned()
        .render(right, buf);
    }
}

impl Drop for HomeScreen {
    fn drop(&mut self) {
        if let Some(images) = &self.deps.images {
            images.cancel_all();
        }
    }
}

impl Widget for &mut HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        self.render_header(header, buf);

        let props = self.props();
        ProductGrid::new(self.feed.products(), props, &self.style)
            .show_scrollbar(self.show_scrollbar)
            .image_preview(self.deps.images.is_some())
            .render(body, buf, &mut self.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::product::fixtures::sample_products;
    use crate::domain::ports::mocks::{MockCatalogPort, MockImageLoaderPort};
    use mockall::predicate::eq;
    use crate::presentation::widgets::EMPTY_MESSAGE;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn ui(page_size: usize) -> UiConfig {
        UiConfig {
            page_size,
            ..UiConfig::default()
        }
    }

    fn paged_catalog() -> MockCatalogPort {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_fetch_page().returning(|request| {
            let products = sample_products();
            let end = (request.offset + request.limit).min(products.len());
            let start = request.offset.min(end);
            Ok(ProductPage {
                products: products[start..end].to_vec(),
                has_more: end < products.len(),
            })
        });
        catalog
    }

    fn screen(
        catalog: Option<MockCatalogPort>,
        page_size: usize,
    ) -> (HomeScreen, mpsc::UnboundedReceiver<AppAction>) {
        screen_with_images(catalog, page_size, None)
    }

    fn screen_with_images(
        catalog: Option<MockCatalogPort>,
        page_size: usize,
        images: Option<MockImageLoaderPort>,
    ) -> (HomeScreen, mpsc::UnboundedReceiver<AppAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let deps = HomeDeps {
            load_products: catalog
                .map(|catalog| LoadProductsUseCase::new(Arc::new(catalog))),
            images: images.map(|images| Arc::new(images) as Arc<dyn ImageLoaderPort>),
            picker: Picker::halfblocks(),
        };
        let screen = HomeScreen::new(deps, &ui(page_size), Theme::default(), tx);
        (screen, rx)
    }

    async fn settle(screen: &mut HomeScreen, rx: &mut mpsc::UnboundedReceiver<AppAction>) {
        match rx.recv().await {
            Some(AppAction::PageLoaded { kind, result }) => screen.on_page_loaded(kind, result),
            other => panic!("expected page, got {other:?}"),
        }
    }

    fn render(screen: &mut HomeScreen, height: u16) -> String {
        let area = Rect::new(0, 0, 64, height);
        let mut buf = Buffer::empty(area);
        Widget::render(&mut *screen, area, &mut buf);
        (0..height)
            .map(|y| (0..64).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_mount_loads_first_page() {
        let (mut screen, mut rx) = screen(Some(paged_catalog()), 4);
        screen.mount();
        assert!(screen.feed().is_refreshing());

        settle(&mut screen, &mut rx).await;

        assert_eq!(screen.products().len(), 4);
        assert!(render(&mut screen, 30).contains("Mens Cotton Jacket"));
    }

    #[tokio::test]
    async fn test_end_reached_loads_next_page() {
        let (mut screen, mut rx) = screen(Some(paged_catalog()), 4);
        screen.mount();
        settle(&mut screen, &mut rx).await;

        // Two rows of cards fit in a tall viewport, so the end is visible.
        render(&mut screen, 60);
        screen.after_render();
        assert!(screen.feed().is_loading());

        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.products().len(), 6);
        assert!(screen.feed().is_exhausted());

        render(&mut screen, 60);
        screen.after_render();
        assert!(!screen.feed().is_loading());
    }

    #[tokio::test]
    async fn test_add_to_cart_updates_header() {
        let (mut screen, mut rx) = screen(Some(paged_catalog()), 6);
        screen.mount();
        settle(&mut screen, &mut rx).await;
        render(&mut screen, 30);

        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Char('a')));
        screen.handle_key(key(KeyCode::Char('a')));

        assert_eq!(screen.cart().quantity(ProductId(1)), 2);
        assert!(render(&mut screen, 30).contains("Cart: 2 items"));
        let status = screen.status().map(|s| s.text.clone()).unwrap_or_default();
        assert!(status.contains("x2"), "{status}");
    }

    #[tokio::test]
    async fn test_focus_announces_accessibility_label() {
        let (mut screen, mut rx) = screen(Some(paged_catalog()), 6);
        screen.mount();
        settle(&mut screen, &mut rx).await;
        render(&mut screen, 30);

        screen.handle_key(key(KeyCode::Down));

        let status = screen.status().map(|s| s.text.clone()).unwrap_or_default();
        assert!(status.contains("Fjallraven"), "{status}");
    }

    #[tokio::test]
    async fn test_mounted_cards_request_images_through_port() {
        let first_url = sample_products()[0].image().to_string();
        let mut images = MockImageLoaderPort::new();
        images
            .expect_request()
            .with(eq(1), eq(first_url))
            .times(1)
            .return_const(());
        images.expect_request().times(3).return_const(());
        images.expect_cancel().never();
        images.expect_cancel_all().times(1).return_const(());

        let (mut screen, mut rx) = screen_with_images(Some(paged_catalog()), 4, Some(images));
        screen.mount();
        settle(&mut screen, &mut rx).await;

        render(&mut screen, 30);
        screen.after_render();
        // Nothing new is mounted on the next frame.
        render(&mut screen, 30);
        screen.after_render();

        drop(screen);
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_error() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_fetch_page().returning(|_| {
            Err(CatalogError::NotFound {
                path: "missing.json".to_string(),
            })
        });
        let (mut screen, mut rx) = screen(Some(catalog), 4);
        screen.mount();
        settle(&mut screen, &mut rx).await;

        assert!(!screen.feed().is_refreshing());
        assert!(screen.products().is_empty());
        let status = screen.status().map(|s| s.text.clone()).unwrap_or_default();
        assert!(status.starts_with("Failed to load products"));
    }

    #[test]
    fn test_without_catalog_shows_empty_state() {
        let (mut screen, mut rx) = screen(None, 4);
        screen.mount();
        screen.handle_key(key(KeyCode::Char('r')));

        assert!(render(&mut screen, 30).contains(EMPTY_MESSAGE));
        assert!(rx.try_recv().is_err());
        assert!(screen.status().is_some());
    }
}
