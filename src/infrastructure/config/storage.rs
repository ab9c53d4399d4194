//! Config file resolution and first-run handling.
//!
//! Loading runs before tracing is installed, so the outcome is kept in a
//! [`LoadedConfig`] and logged once a subscriber exists.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no platform config directory and no --config given")]
    NoConfigDir,
    #[error("config file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// How the loaded configuration was obtained.
#[derive(Debug)]
pub enum ConfigOrigin {
    /// Parsed from an existing file.
    File,
    /// No file existed; defaults were written to it.
    Created,
    /// The file did not parse and was left untouched; defaults are used.
    Malformed(toml::de::Error),
}

/// The TOML file backing [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Uses `override_path` if given, else `config.toml` in the platform
    /// config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if neither is available.
    pub fn locate(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        override_path
            .or_else(AppConfig::default_config_path)
            .map(Self::at)
            .ok_or(ConfigError::NoConfigDir)
    }

    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, or the
    /// defaults cannot be written.
    pub fn load(&self) -> Result<(AppConfig, ConfigOrigin), ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(match toml::from_str::<AppConfig>(&content) {
                Ok(config) => (config, ConfigOrigin::File),
                Err(e) => (AppConfig::default(), ConfigOrigin::Malformed(e)),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = AppConfig::default();
                self.write(&config)?;
                Ok((config, ConfigOrigin::Created))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the file atomically.
    fn write(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(content.as_bytes())?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Configuration plus how it was obtained.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// File and origin, or why no file could be used.
    pub source: Result<(PathBuf, ConfigOrigin), ConfigError>,
}

impl LoadedConfig {
    /// Loads from `store`. If the store could not be located, defaults are
    /// used and the reason is kept in `source`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an existing file cannot be read or the
    /// defaults cannot be written.
    pub fn resolve(store: Result<ConfigStore, ConfigError>) -> Result<Self, ConfigError> {
        match store {
            Ok(store) => {
                let (config, origin) = store.load()?;
                Ok(Self {
                    config,
                    source: Ok((store.path, origin)),
                })
            }
            Err(e) => Ok(Self {
                config: AppConfig::default(),
                source: Err(e),
            }),
        }
    }

    /// Logs where the configuration came from.
    pub fn log(&self) {
        match &self.source {
            Ok((path, ConfigOrigin::File)) => info!(path = %path.display(), "Loaded config"),
            Ok((path, ConfigOrigin::Created)) => {
                info!(path = %path.display(), "Wrote default config");
            }
            Ok((path, ConfigOrigin::Malformed(e))) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Config file is malformed, using defaults"
                );
            }
            Err(e) => warn!(error = %e, "Config unavailable, using defaults"),
        }
    }
}
