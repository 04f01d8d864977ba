//! Composition root: resolves paths and config, then wires the stores.

use anyhow::{Context, Result};
use colored::Colorize;
use postpilot_application::{ContentStore, SessionStore};
use postpilot_core::clock::{Clock, SystemClock};
use postpilot_core::config::AppConfig;
use postpilot_core::gateway::RemoteGateway;
use postpilot_core::storage::KeyValueStore;
use postpilot_infrastructure::config_service::missing_endpoints;
use postpilot_infrastructure::{
    ConfigService, InMemoryKeyValueStore, JsonFileStore, LocalMirror, PostPilotPaths,
};
use postpilot_interaction::WebhookGateway;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line overrides. Flags win over the environment and the file.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

/// Resolved locations and configuration, before anything is opened.
pub struct Bootstrap {
    pub paths: PostPilotPaths,
    pub config_path: PathBuf,
    pub config: AppConfig,
}

/// Everything the shell needs.
pub struct App {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub content: ContentStore,
}

impl Bootstrap {
    pub fn resolve(options: &Options) -> Result<Self> {
        let paths = PostPilotPaths::from_system().context("Failed to resolve PostPilot directories")?;
        Self::resolve_with(paths, options)
    }

    fn resolve_with(paths: PostPilotPaths, options: &Options) -> Result<Self> {
        let config_path = options
            .config_path
            .clone()
            .unwrap_or_else(|| paths.config_file());
        let config = ConfigService::new(&config_path)
            .load()
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let data_dir = options
            .data_dir
            .clone()
            .or_else(|| config.storage.data_dir.clone());
        let paths = match data_dir {
            Some(dir) => paths.with_data_dir(dir),
            None => paths,
        };

        Ok(Self {
            paths,
            config_path,
            config,
        })
    }

    pub fn print_paths(&self) {
        println!("{} {}", "config:".bright_black(), self.config_path.display());
        println!("{} {}", "store: ".bright_black(), self.paths.store_dir().display());
        println!("{} {}", "logs:  ".bright_black(), self.paths.logs_dir().display());
    }

    /// Opens the local mirror and builds the stores.
    pub async fn build(self, options: &Options) -> Result<App> {
        let kv: Arc<dyn KeyValueStore> = if options.ephemeral {
            tracing::info!("[Bootstrap] Ephemeral run, state stays in memory");
            Arc::new(InMemoryKeyValueStore::new())
        } else {
            let dir = self.paths.store_dir();
            tracing::info!("[Bootstrap] Local mirror at {}", dir.display());
            Arc::new(JsonFileStore::new(dir))
        };
        let mirror = LocalMirror::new(kv);

        for endpoint in missing_endpoints(&self.config) {
            tracing::warn!(
                "[Bootstrap] No URL for {} (set {})",
                endpoint,
                endpoint.env_var()
            );
        }

        let gateway: Arc<dyn RemoteGateway> =
            Arc::new(WebhookGateway::new(&self.config).context("Failed to build HTTP client")?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let sessions = SessionStore::new(gateway.clone(), mirror.clone(), clock.clone());
        let content = ContentStore::load(mirror, gateway, clock)
            .await
            .context("Failed to load local content")?;

        tracing::info!("[Bootstrap] Stores ready");

        Ok(App {
            config: self.config,
            sessions,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flag_data_dir_wins() {
        let temp = TempDir::new().unwrap();
        let options = Options {
            data_dir: Some(temp.path().join("elsewhere")),
            ..Default::default()
        };
        let bootstrap = Bootstrap::resolve_with(PostPilotPaths::with_base(temp.path()), &options).unwrap();

        assert_eq!(bootstrap.paths.data_dir(), temp.path().join("elsewhere"));
        assert_eq!(bootstrap.config_path, temp.path().join("config").join("config.toml"));
        assert!(bootstrap.config_path.exists());
    }

    #[test]
    fn test_explicit_config_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("custom.toml");
        std::fs::write(&config_path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let options = Options {
            config_path: Some(config_path.clone()),
            ..Default::default()
        };

        let bootstrap = Bootstrap::resolve_with(PostPilotPaths::with_base(temp.path()), &options).unwrap();
        assert_eq!(bootstrap.config_path, config_path);
        // POSTPILOT_LOG_LEVEL may be set in the environment running the tests.
        if std::env::var("POSTPILOT_LOG_LEVEL").is_err() {
            assert_eq!(bootstrap.config.logging.level, "debug");
        }
    }

    #[tokio::test]
    async fn test_ephemeral_build_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let options = Options {
            ephemeral: true,
            ..Default::default()
        };
        let bootstrap = Bootstrap::resolve_with(PostPilotPaths::with_base(temp.path()), &options).unwrap();
        let store_dir = bootstrap.paths.store_dir();

        let app = bootstrap.build(&options).await.unwrap();
        app.content.decline_post("post_1").await.unwrap();

        assert!(!store_dir.exists());
    }
}
