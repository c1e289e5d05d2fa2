//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from a TOML file. Configuration is optional: a missing
//! file means defaults, and an unreadable or invalid one is logged and
//! replaced by defaults so the service can still start.

use std::path::{Path, PathBuf};

use brainstorm_core::config::AppConfig;
use brainstorm_core::error::Result;

use crate::paths::BrainstormPaths;

/// Loads the application configuration from one TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Reads configuration from an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads configuration from `config.toml` in the resolved config directory.
    pub fn from_paths(paths: &BrainstormPaths) -> Result<Self> {
        Ok(Self::new(paths.config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, falling back to defaults on any failure.
    pub fn load(&self) -> AppConfig {
        if !self.path.exists() {
            tracing::debug!(
                "[Config] No config file at {}, using defaults",
                self.path.display()
            );
            return AppConfig::default();
        }

        match self.try_load() {
            Ok(config) => {
                tracing::debug!("[Config] Loaded {}", self.path.display());
                config
            }
            Err(e) => {
                tracing::warn!(
                    "[Config] Failed to load {}: {}. Using defaults",
                    self.path.display(),
                    e
                );
                AppConfig::default()
            }
        }
    }

    /// Loads the configuration, surfacing read and parse errors.
    pub fn try_load(&self) -> Result<AppConfig> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        assert_eq!(service.load(), AppConfig::default());
        assert!(service.try_load().unwrap_err().is_io());
    }

    #[test]
    fn test_loads_values_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 7070\napi_prefix = \"\"\n\n[logging]\njson = true\n",
        )
        .unwrap();

        let config = ConfigService::new(&path).load();
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.server.api_prefix, "");
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let service = ConfigService::new(&path);
        assert_eq!(service.load(), AppConfig::default());
        assert!(service.try_load().unwrap_err().is_serialization());
    }

    #[test]
    fn test_from_paths_uses_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BrainstormPaths::new(Some(temp_dir.path()));
        let service = ConfigService::from_paths(&paths).unwrap();
        assert!(service.path().ends_with("config/config.toml"));
    }
}
