use super::app_config::{InitialRoute, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "A terminal storefront with login and a product grid",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON catalog supplying the products.
    #[arg(long, value_name = "PATH", env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Screen shown at startup.
    #[arg(long, value_enum)]
    pub route: Option<InitialRoute>,

    /// Products requested per page.
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Render product images.
    #[arg(long)]
    pub image_preview: Option<bool>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}
