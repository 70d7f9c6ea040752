use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory (containers, tests)
pub const BASE_PATH_ENV: &str = "MOVIES_BASE_PATH";

const APP_DIR: &str = "movies";

pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Where the config file, the credentials and the default SQLite database live
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    /// Platform directories, e.g. `~/.config/movies` and `~/.local/share/movies` on Linux
    pub fn platform() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        let data_dir = dirs::data_local_dir().unwrap_or_else(|| config_dir.clone());
        Ok(Self {
            config_dir: config_dir.join(APP_DIR),
            data_dir: data_dir.join(APP_DIR),
        })
    }

    /// Everything under a single directory
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_sqlite_file(&self) -> PathBuf {
        self.data_dir.join("movies.db")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::with_base(base);
        }
        Self::platform().unwrap_or_else(|_| Self::with_base(".movies"))
    }
}
