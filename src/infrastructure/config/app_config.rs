//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "storefront";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "storefront";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Screen mounted at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InitialRoute {
    /// Login form.
    #[default]
    Login,
    /// Product grid.
    Home,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Screen shown first.
    #[serde(default)]
    pub initial_route: InitialRoute,

    /// JSON file supplying products. Without one the grid stays empty.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Login form configuration.
    #[serde(default)]
    pub login: LoginConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Render product images inside cards.
    #[serde(default = "default_true")]
    pub image_preview: bool,

    /// Show a scrollbar next to the grid.
    #[serde(default)]
    pub show_scrollbar: bool,

    /// Products requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Grid layout and virtualization.
    #[serde(default)]
    pub grid: GridConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            image_preview: true,
            show_scrollbar: false,
            page_size: default_page_size(),
            grid: GridConfig::default(),
        }
    }
}

/// Product grid layout and virtualization knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cells of padding on each side of the grid.
    pub outer_padding: u16,
    /// Cells between the two columns.
    pub column_gap: u16,
    /// Approximate row height in lines, used for scroll offsets.
    pub item_height: u16,
    /// Products materialized on mount.
    pub initial_num_to_render: usize,
    /// Maximum products materialized per scroll step.
    pub max_to_render_per_batch: usize,
    /// Materialization window, in viewport heights.
    pub window_size: usize,
    /// Distance from the end, in viewport heights, that triggers load-more.
    pub end_reached_threshold: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            outer_padding: 2,
            column_gap: 2,
            item_height: 12,
            initial_num_to_render: 6,
            max_to_render_per_batch: 10,
            window_size: 10,
            end_reached_threshold: 0.1,
        }
    }
}

/// Login form configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Simulated authentication delay in milliseconds.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

fn default_accent_color() -> String {
    "#007AFF".to_string()
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    10
}

fn default_submit_delay_ms() -> u64 {
    800
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(route) = args.route {
            self.initial_route = route;
        }
        if let Some(catalog) = args.catalog {
            self.catalog = Some(catalog);
        }
        if let Some(page_size) = args.page_size {
            self.ui.page_size = page_size;
        }
        if let Some(image_preview) = args.image_preview {
            self.ui.image_preview = image_preview;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
    }

    /// Returns `config.toml` in the platform config directory.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("storefront.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            mouse: true,
            initial_route: InitialRoute::default(),
            catalog: None,
            ui: UiConfig::default(),
            login: LoginConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            initial_route = "home"
            catalog = "/tmp/products.json"

            [ui]
            page_size = 4
            show_scrollbar = true

            [ui.grid]
            item_height = 10
            column_gap = 4

            [login]
            submit_delay_ms = 50
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.initial_route, InitialRoute::Home);
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/products.json")));
        assert_eq!(config.ui.page_size, 4);
        assert!(config.ui.show_scrollbar);
        assert!(config.ui.image_preview);
        assert_eq!(config.ui.grid.item_height, 10);
        assert_eq!(config.ui.grid.column_gap, 4);
        assert_eq!(config.ui.grid.outer_padding, 2);
        assert_eq!(config.login.submit_delay_ms, 50);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.initial_route, InitialRoute::Login);
        assert!(config.catalog.is_none());
        assert_eq!(config.login.submit_delay_ms, 800);
        assert_eq!(config.ui.grid.initial_num_to_render, 6);
        assert_eq!(config.ui.grid.max_to_render_per_batch, 10);
        assert_eq!(config.ui.grid.window_size, 10);
        assert_eq!(config.theme.accent_color, "#007AFF");
    }

    #[test]
    fn test_merge_with_args_overrides_only_given_flags() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "storefront",
            "--route",
            "home",
            "--page-size",
            "3",
            "--catalog",
            "items.json",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.initial_route, InitialRoute::Home);
        assert_eq!(config.ui.page_size, 3);
        assert_eq!(config.catalog, Some(PathBuf::from("items.json")));
        assert!(config.mouse);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
