//! Unified path management for tolk configuration files.
//!
//! All paths hang off the platform config directory resolved by `dirs`.

use std::path::PathBuf;

const APP_DIR: &str = "tolk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither the config directory nor the home directory could be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for tolk.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/tolk/              # Config directory
/// ├── config.toml              # Model endpoint and translation settings
/// └── logs/                    # Application logs
///     └── tolk.log.YYYY-MM-DD
/// ```
pub struct TolkPaths;

impl TolkPaths {
    /// Returns the tolk configuration directory (e.g., `~/.config/tolk/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = TolkPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("tolk"));
    }

    #[test]
    fn test_config_file() {
        let config_file = TolkPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        // Verify it's under config_dir
        let config_dir = TolkPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = TolkPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        let config_dir = TolkPaths::config_dir().unwrap();
        assert!(logs_dir.starts_with(&config_dir));
    }
}
