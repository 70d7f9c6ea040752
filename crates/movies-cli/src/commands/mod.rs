pub mod add;
pub mod config;
pub mod fetch;
pub mod list;
pub mod prompts;
pub mod show;
pub mod transfer;

use color_eyre::Result;
use movies_config::{Config, CredentialStore, PathManager};
use movies_sources::StoreSettings;
use std::time::Duration;

/// Configuration, credentials and paths shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub settings: StoreSettings,
}

impl AppContext {
    pub fn load(notion_token: Option<String>, notion_database: Option<String>) -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid config {}: {}", config_file.display(), e))?;

        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        let settings = StoreSettings {
            notion_token,
            notion_database_id: notion_database,
            credentials: Some(credentials),
            default_sqlite_path: config
                .sqlite
                .path
                .clone()
                .unwrap_or_else(|| paths.default_sqlite_file()),
            timeout: Some(Duration::from_secs(config.http.timeout_secs)),
        };

        tracing::debug!(
            config_file = %config_file.display(),
            default_sqlite = %settings.default_sqlite_path.display(),
            "Loaded application context"
        );

        Ok(Self { paths, config, settings })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.http.timeout_secs)
    }
}
