//! Opening stores from a `notion` / `sqlite:PATH` description

use movies_config::{CredentialStore, NotionCredentials};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use crate::error::StoreError;
use crate::notion::NotionDatabase;
use crate::sqlite::SqliteDatabase;
use crate::traits::Database;

const SQLITE_PREFIX: &str = "sqlite";

/// Which backend a command reads from or writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Notion,
    /// `None` means the configured default database file
    Sqlite(Option<PathBuf>),
}

impl FromStr for StoreKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("notion") {
            return Ok(Self::Notion);
        }
        if s.eq_ignore_ascii_case(SQLITE_PREFIX) {
            return Ok(Self::Sqlite(None));
        }
        match s.split_once(':') {
            Some((prefix, path)) if prefix.eq_ignore_ascii_case(SQLITE_PREFIX) => {
                if path.trim().is_empty() {
                    Ok(Self::Sqlite(None))
                } else {
                    Ok(Self::Sqlite(Some(PathBuf::from(path))))
                }
            }
            _ => Err(StoreError::schema(format!(
                "unknown store '{}': expected 'notion' or 'sqlite:PATH'",
                s
            ))),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notion => write!(f, "notion"),
            Self::Sqlite(None) => write!(f, "sqlite"),
            Self::Sqlite(Some(path)) => write!(f, "sqlite:{}", path.display()),
        }
    }
}

/// What is needed to open any store
///
/// Notion credentials are only resolved when a Notion store is opened, so a
/// purely local command works without them.
#[derive(Default)]
pub struct StoreSettings {
    pub notion_token: Option<String>,
    pub notion_database_id: Option<String>,
    pub credentials: Option<CredentialStore>,
    pub default_sqlite_path: PathBuf,
    pub timeout: Option<Duration>,
}

impl StoreSettings {
    pub fn notion_credentials(&self) -> Result<NotionCredentials, StoreError> {
        Ok(NotionCredentials::resolve(
            self.notion_token.clone(),
            self.notion_database_id.clone(),
            self.credentials.as_ref(),
        )?)
    }

    pub fn sqlite_path(&self, kind_path: Option<&PathBuf>) -> PathBuf {
        kind_path.cloned().unwrap_or_else(|| self.default_sqlite_path.clone())
    }

    /// Whether two descriptions name the same underlying store
    ///
    /// SQLite paths are compared after resolving the default file, relative
    /// components and symlinks, so `sqlite` and `sqlite:<default>` match.
    pub fn same_store(&self, a: &StoreKind, b: &StoreKind) -> bool {
        match (a, b) {
            (StoreKind::Notion, StoreKind::Notion) => true,
            (StoreKind::Sqlite(a), StoreKind::Sqlite(b)) => {
                normalize_path(&self.sqlite_path(a.as_ref())) == normalize_path(&self.sqlite_path(b.as_ref()))
            }
            _ => false,
        }
    }
}

/// Absolute form of a path that may not exist yet
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let parent = absolute.parent().and_then(|p| p.canonicalize().ok());
    match (parent, absolute.file_name()) {
        (Some(parent), Some(name)) => parent.join(name),
        _ => absolute
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect(),
    }
}

pub fn open_store(kind: &StoreKind, settings: &StoreSettings) -> Result<Box<dyn Database>, StoreError> {
    match kind {
        StoreKind::Notion => {
            let credentials = settings.notion_credentials()?;
            let database = match settings.timeout {
                Some(timeout) => NotionDatabase::with_timeout(credentials, timeout)?,
                None => NotionDatabase::new(credentials)?,
            };
            info!("Opened Notion database {}", database.database_id());
            Ok(Box::new(database))
        }
        StoreKind::Sqlite(path) => {
            let path = settings.sqlite_path(path.as_ref());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let database = SqliteDatabase::open(&path)?;
            info!("Opened SQLite database {}", database.location());
            Ok(Box::new(database))
        }
    }
}
