//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    AppConfig, GridConfig, InitialRoute, LogLevel, LoginConfig, ThemeConfig, UiConfig,
};
pub use args::CliArgs;
pub use storage::{ConfigError, ConfigOrigin, ConfigStore, LoadedConfig};
