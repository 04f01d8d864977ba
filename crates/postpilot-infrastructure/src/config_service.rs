//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml`, creating the file with defaults on
//! first run, then applies `POSTPILOT_*` environment overrides.

use crate::storage::AtomicTomlFile;
use postpilot_core::Result;
use postpilot_core::config::{AppConfig, Endpoint};
use std::path::PathBuf;
use strum::IntoEnumIterator;

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "POSTPILOT_DATA_DIR";

/// Overrides the default log level.
pub const LOG_LEVEL_ENV: &str = "POSTPILOT_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the file (creating it with defaults when missing) and applies
    /// overrides from the process environment.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_file()?;
        apply_overrides(&mut config, |name| std::env::var(name).ok());
        Ok(config)
    }

    /// Reads the file only, creating it with defaults when missing.
    pub fn load_file(&self) -> Result<AppConfig> {
        let file = AtomicTomlFile::<AppConfig>::new(&self.path);
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = AppConfig::default();
                file.save(&config)?;
                tracing::info!("[ConfigService] Created default config at {}", self.path.display());
                Ok(config)
            }
        }
    }
}

/// Applies environment overrides using `lookup` to read variables.
///
/// Blank values are ignored.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    for endpoint in Endpoint::iter() {
        if let Some(url) = read(endpoint.env_var()) {
            tracing::debug!("[ConfigService] {} overridden by {}", endpoint, endpoint.env_var());
            config.webhooks.set_url(endpoint, url);
        }
    }

    if let Some(dir) = read(DATA_DIR_ENV) {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }

    if let Some(level) = read(LOG_LEVEL_ENV) {
        config.logging.level = level;
    }
}

/// Endpoints that have no URL after overrides.
pub fn missing_endpoints(config: &AppConfig) -> Vec<Endpoint> {
    Endpoint::iter()
        .filter(|endpoint| config.webhooks.url(*endpoint).is_none())
        .collect()
}
