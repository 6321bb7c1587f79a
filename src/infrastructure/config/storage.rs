use super::app_config::AppConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("config path has no parent directory: {0}")]
    NoParent(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Reads and writes `config.toml`.
pub struct StorageManager {
    config_path: PathBuf,
}

impl StorageManager {
    /// Uses the platform config location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_path()
            .map(Self::at)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses the config file at `path`.
    #[must_use]
    pub fn at(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Loads the configuration. A missing file is created with the
    /// defaults; a malformed one yields the defaults and is left as is.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or created.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let path = &self.config_path;
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, writing defaults");
            let config = AppConfig::default();
            self.save_config(&config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Malformed config file, using defaults");
            AppConfig::default()
        }))
    }

    /// Replaces the config file atomically.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::NoParent(self.config_path.clone()))?;
        fs::create_dir_all(dir)?;
        write_atomic(dir, &self.config_path, content.as_bytes())
    }
}

fn write_atomic(dir: &Path, path: &Path, content: &[u8]) -> Result<(), ConfigError> {
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(content)?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
