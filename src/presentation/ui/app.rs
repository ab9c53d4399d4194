//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use ratatui_image::picker::Picker;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::use_cases::{LoadProductsUseCase, LoginUseCase};
use crate::domain::ports::{AuthPort, CatalogPort, ImageLoaderPort};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::image::{ImageLoadedEvent, ImageLoader, ImageLoaderConfig};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::theme::Theme;
use crate::presentation::ui::action::AppAction;
use crate::presentation::ui::home_screen::{HomeDeps, HomeScreen};
use crate::presentation::ui::login_screen::LoginScreen;
use crate::presentation::ui::router::{Route, Router};
use crate::presentation::widgets::{StatusBar, StatusMessage};

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(100);

enum CurrentScreen {
    Login(LoginScreen),
    Home(Box<HomeScreen>),
}

impl CurrentScreen {
    const fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Home(_) => Route::Home,
        }
    }

    fn status(&self) -> Option<&StatusMessage> {
        match self {
            Self::Login(screen) => screen.status(),
            Self::Home(screen) => screen.status(),
        }
    }

    fn hints(&self) -> &'static str {
        match self {
            Self::Login(screen) => screen.hints(),
            Self::Home(screen) => screen.hints(),
        }
    }
}

pub struct App {
    config: AppConfig,
    theme: Theme,
    router: Router,
    screen: Option<CurrentScreen>,
    login_use_case: LoginUseCase,
    load_products: Option<LoadProductsUseCase>,
    images: Option<Arc<ImageLoader>>,
    image_rx: Option<mpsc::UnboundedReceiver<ImageLoadedEvent>>,
    picker: Picker,
    action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
    signed_in: Option<String>,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(
        config: AppConfig,
        auth_port: Arc<dyn AuthPort>,
        catalog: Option<Arc<dyn CatalogPort>>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            theme: Theme::new(&config.theme.accent_color),
            router: Router::new(config.initial_route.into()),
            screen: None,
            login_use_case: LoginUseCase::new(auth_port),
            load_products: catalog.map(LoadProductsUseCase::new),
            images: None,
            image_rx: None,
            picker: Picker::halfblocks(),
            action_tx,
            action_rx,
            signed_in: None,
            running: true,
            config,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if self.config.ui.image_preview {
            self.start_image_loader();
        }
        self.mount(self.router.current());

        self.run_event_loop(terminal).await?;

        if let Some(images) = &self.images {
            info!(stats = %images.memory_cache_stats(), "Image cache");
        }
        info!("Application exiting normally");
        Ok(())
    }

    fn start_image_loader(&mut self) {
        self.picker = Picker::from_query_stdio().unwrap_or_else(|e| {
            warn!(error = ?e, "Terminal graphics query failed, using half blocks");
            Picker::halfblocks()
        });

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        match ImageLoader::new(ImageLoaderConfig::default(), event_tx) {
            Ok(loader) => {
                self.images = Some(Arc::new(loader));
                self.image_rx = Some(event_rx);
            }
            Err(e) => warn!(error = %e, "Image loading disabled"),
        }
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        self.draw(terminal)?;

        while self.running {
            let image_future = match &mut self.image_rx {
                Some(rx) => futures_util::future::Either::Left(rx.recv()),
                None => futures_util::future::Either::Right(std::future::pending()),
            };
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(Ok(event)) = terminal_event => {
                    self.handle_terminal_event(event);
                    self.draw(terminal)?;
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    self.draw(terminal)?;
                }

                Some(event) = image_future => {
                    if let Some(CurrentScreen::Home(home)) = &mut self.screen {
                        home.on_image_loaded(&event);
                    }
                    self.draw(terminal)?;
                }

                _ = animation_interval.tick() => {
                    if self.tick() {
                        self.draw(terminal)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        if let Some(CurrentScreen::Home(home)) = &mut self.screen {
            home.after_render();
        }
        Ok(())
    }

    /// Advances animations. Returns true if a redraw is needed.
    fn tick(&mut self) -> bool {
        match &mut self.screen {
            Some(CurrentScreen::Home(home)) => {
                home.tick();
                true
            }
            Some(CurrentScreen::Login(screen)) => screen.is_submitting(),
            None => false,
        }
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if self.config.mouse => self.handle_mouse(mouse),
            Event::Resize(width, height) => debug!(width, height, "Terminal resized"),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match EventHandler::classify(&key, self.router.current()) {
            EventResult::Exit => self.running = false,
            EventResult::Back => self.back(),
            EventResult::Continue if key.kind == KeyEventKind::Press => match &mut self.screen {
                Some(CurrentScreen::Login(screen)) => {
                    screen.handle_key(key);
                }
                Some(CurrentScreen::Home(home)) => home.handle_key(key),
                None => {}
            },
            EventResult::Continue => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match &mut self.screen {
            Some(CurrentScreen::Login(screen)) => {
                screen.handle_mouse(mouse);
            }
            Some(CurrentScreen::Home(home)) => home.handle_mouse(mouse),
            None => {}
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::LoginFinished {
                submission_id,
                result,
            } => {
                let Some(CurrentScreen::Login(screen)) = &mut self.screen else {
                    debug!(submission_id, "Login result arrived after leaving login");
                    return;
                };
                if let Some(email) = screen.on_login_finished(submission_id, result) {
                    info!(email = %email, "Signed in");
                    self.signed_in = Some(email);
                    self.navigate(Route::Home);
                }
            }
            AppAction::PageLoaded { kind, result } => {
                if let Some(CurrentScreen::Home(home)) = &mut self.screen {
                    home.on_page_loaded(kind, result);
                } else {
                    debug!(?kind, "Product page arrived after leaving home");
                }
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        if self.router.navigate(route) {
            self.mount(route);
        }
    }

    fn back(&mut self) {
        if self.router.back() {
            self.mount(self.router.current());
        } else {
            self.running = false;
        }
    }

    /// Replaces the mounted screen. Dropping the old one cancels its work.
    fn mount(&mut self, route: Route) {
        info!(route = route.title(), "Mounting screen");
        self.screen = Some(match route {
            Route::Login => CurrentScreen::Login(LoginScreen::new(
                self.login_use_case.clone(),
                self.action_tx.clone(),
                self.theme,
            )),
            Route::Home => {
                let deps = HomeDeps {
                    load_products: self.load_products.clone(),
                    images: self
                        .images
                        .clone()
                        .map(|loader| loader as Arc<dyn ImageLoaderPort>),
                    picker: self.picker.clone(),
                };
                let mut home = HomeScreen::new(
                    deps,
                    &self.config.ui,
                    self.theme,
                    self.action_tx.clone(),
                )
                .signed_in(self.signed_in.clone());
                home.mount();
                CurrentScreen::Home(Box::new(home))
            }
        });
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header);

        match &mut self.screen {
            Some(CurrentScreen::Login(screen)) => frame.render_widget(screen, body),
            Some(CurrentScreen::Home(home)) => frame.render_widget(&mut **home, body),
            None => {}
        }

        if let Some(screen) = &self.screen {
            frame.render_widget(
                StatusBar::new(&self.theme)
                    .message(screen.status())
                    .right(screen.hints()),
                status,
            );
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .screen
            .as_ref()
            .map_or(self.router.current(), CurrentScreen::route)
            .title();
        let line = Line::from(vec![
            Span::styled(
                format!(" {} v{} ", crate::NAME, crate::VERSION),
                self.theme
                    .base_style
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("| {title}"), self.theme.dimmed_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
