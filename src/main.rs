use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use storefront::domain::ports::CatalogPort;
use storefront::infrastructure::{
    AppConfig, CliArgs, ConfigStore, DemoAuthenticator, JsonFileCatalog, LoadedConfig,
};
use storefront::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<LoadedConfig> {
    let args = CliArgs::parse();
    let mut loaded = LoadedConfig::resolve(ConfigStore::locate(args.config.clone()))?;
    loaded.config.merge_with_args(args);
    Ok(loaded)
}

fn create_app() -> Result<(App, bool)> {
    let loaded = load_config()?;

    init_logging(&loaded.config)?;

    info!(version = storefront::VERSION, "Starting {}", storefront::NAME);
    loaded.log();
    let config = loaded.config;

    let auth = Arc::new(DemoAuthenticator::new(Duration::from_millis(
        config.login.submit_delay_ms,
    )));
    let catalog = config.catalog.as_ref().map(|path| {
        info!(path = %path.display(), "Using JSON catalog");
        Arc::new(JsonFileCatalog::new(path.clone())) as Arc<dyn CatalogPort>
    });
    if catalog.is_none() {
        warn!("No catalog configured, the product grid will be empty");
    }

    let mouse = config.mouse;
    let app = App::new(config, auth, catalog);

    Ok((app, mouse))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (app, mouse) = create_app()?;

    let mut terminal = ratatui::init();
    if mouse {
        execute!(std::io::stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if mouse {
        execute!(std::io::stdout(), DisableMouseCapture)?;
    }
    ratatui::restore();

    result
}
