//! Unified path management for PostPilot files.
//!
//! Platform directories are resolved with `dirs`, so the layout follows XDG on
//! Linux and the native conventions on macOS and Windows.

use postpilot_core::{PostPilotError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "postpilot";

/// Resolved locations of every file PostPilot reads or writes.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/postpilot/          # Config directory
/// ├── config.toml               # Application configuration
/// └── logs/                     # Daily-rotated logs
///     └── postpilot.log.YYYY-MM-DD
///
/// ~/.local/share/postpilot/     # Data directory
/// └── store/                    # Local mirror, one JSON document per key
///     ├── user.json
///     ├── userPosts.json
///     └── userBrands.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPilotPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PostPilotPaths {
    /// Resolves the platform config and data directories.
    ///
    /// # Returns
    ///
    /// - `Ok(PostPilotPaths)`: Both directories could be determined
    /// - `Err(PostPilotError::Config)`: No home directory on this platform
    pub fn from_system() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PostPilotError::config("Cannot find config directory"))?
            .join(APP_DIR_NAME);
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PostPilotError::config("Cannot find data directory"))?
            .join(APP_DIR_NAME);

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Places everything under a single base directory.
    ///
    /// Used by tests and by `--ephemeral` runs.
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            config_dir: base.join("config"),
            data_dir: base.join("data"),
        }
    }

    /// Replaces the data directory, keeping the config directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Directory holding the local mirror documents.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_paths_end_with_app_dir() {
        // Home may be missing in minimal CI containers.
        if let Ok(paths) = PostPilotPaths::from_system() {
            assert!(paths.config_dir().ends_with("postpilot"));
            assert!(paths.data_dir().ends_with("postpilot"));
        }
    }

    #[test]
    fn test_base_layout() {
        let paths = PostPilotPaths::with_base("/tmp/pp");

        assert_eq!(paths.config_file(), PathBuf::from("/tmp/pp/config/config.toml"));
        assert_eq!(paths.store_dir(), PathBuf::from("/tmp/pp/data/store"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/pp/config/logs"));
    }

    #[test]
    fn test_data_dir_override_keeps_config() {
        let paths = PostPilotPaths::with_base("/tmp/pp").with_data_dir("/srv/postpilot");

        assert_eq!(paths.store_dir(), PathBuf::from("/srv/postpilot/store"));
        assert!(paths.config_file().starts_with("/tmp/pp/config"));
    }
}
