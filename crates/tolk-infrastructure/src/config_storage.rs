//! TOML storage for [`TolkConfig`].

use std::fs;
use std::path::{Path, PathBuf};
use tolk_core::config::TolkConfig;
use tolk_core::{Result, TolkError};

use crate::paths::TolkPaths;

/// Reads and writes `config.toml`.
///
/// This type is purely responsible for the file on disk; environment
/// overrides are applied by [`ConfigStorage::load_with_env`].
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Uses the default location, `~/.config/tolk/config.toml`.
    pub fn new() -> Result<Self> {
        let path = TolkPaths::config_file().map_err(|e| TolkError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Uses an explicit file path (for tests and `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(TolkConfig)`: The parsed file, or defaults if the file does not
    ///   exist or is empty
    /// - `Err(TolkError)`: The file exists but cannot be read or parsed
    pub fn load(&self) -> Result<TolkConfig> {
        if !self.path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", self.path);
            return Ok(TolkConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(TolkConfig::default());
        }

        let config: TolkConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the configuration, applies `TOLK_*` environment overrides and validates it.
    pub fn load_with_env(&self) -> Result<TolkConfig> {
        let mut config = self.load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration, creating the parent directory if needed.
    pub fn save(&self, config: &TolkConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(config)?;
        fs::write(&self.path, toml_string)?;
        tracing::info!("Saved config to {:?}", self.path);
        Ok(())
    }

    /// Writes the default configuration unless a file already exists.
    ///
    /// Returns `true` when a new file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&TolkConfig::default())?;
        Ok(true)
    }
}
