//! Path management for brainstorm configuration, data and logs.
//!
//! Paths resolve under the platform directories reported by `dirs`, or under
//! a single base directory when one is given (tests, portable installs).

use std::path::{Path, PathBuf};

use brainstorm_core::error::{BrainstormError, Result};

const APP_DIR: &str = "brainstorm";

/// Path resolution for brainstorm.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/brainstorm/        # Config directory
/// ├── config.toml              # Application configuration
/// └── logs/                    # Daily-rotated log files
///     └── brainstorm.log.YYYY-MM-DD
///
/// ~/.local/share/brainstorm/   # Data directory
/// ├── sessions.json
/// └── ideas.json
/// ```
///
/// With a base directory, `config/`, `data/` and `config/logs/` are created
/// beneath it instead.
#[derive(Debug, Clone, Default)]
pub struct BrainstormPaths {
    base_dir: Option<PathBuf>,
}

impl BrainstormPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `BrainstormError::Config` when no platform config directory exists.
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| BrainstormError::config("Cannot determine config directory")),
        }
    }

    /// Returns the directory holding `sessions.json` and `ideas.json`.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| BrainstormError::config("Cannot determine data directory")),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_dir_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BrainstormPaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_dir().unwrap(), temp_dir.path().join("config"));
        assert_eq!(paths.data_dir().unwrap(), temp_dir.path().join("data"));
        assert_eq!(
            paths.config_file().unwrap(),
            temp_dir.path().join("config").join("config.toml")
        );
        assert!(paths.logs_dir().unwrap().starts_with(paths.config_dir().unwrap()));
    }

    #[test]
    fn test_platform_dirs_end_with_app_name() {
        let paths = BrainstormPaths::default();
        if let Ok(config_dir) = paths.config_dir() {
            assert!(config_dir.ends_with(APP_DIR));
        }
        if let Ok(data_dir) = paths.data_dir() {
            assert!(data_dir.ends_with(APP_DIR));
        }
    }
}
