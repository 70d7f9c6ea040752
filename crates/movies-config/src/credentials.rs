use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk layout of `credentials.toml`
///
/// ```toml
/// [notion]
/// token = "secret_..."
/// database_id = "0123abcd..."
/// ```
#[derive(Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(default, skip_serializing_if = "NotionSection::is_empty")]
    notion: NotionSection,
}

#[derive(Default, Serialize, Deserialize)]
struct NotionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database_id: Option<String>,
}

impl NotionSection {
    fn is_empty(&self) -> bool {
        self.token.is_none() && self.database_id.is_none()
    }
}

/// Secrets persisted next to the config file
pub struct CredentialStore {
    path: PathBuf,
    file: CredentialsFile,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: CredentialsFile::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load from disk; a missing file leaves the store empty
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)?;
        self.file = toml::from_str(&content)
            .with_context(|| format!("{} is not a valid credentials file", self.path.display()))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&self.file)?)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    pub fn notion_token(&self) -> Option<&str> {
        self.file.notion.token.as_deref()
    }

    pub fn set_notion_token(&mut self, token: impl Into<String>) {
        self.file.notion.token = Some(token.into());
    }

    pub fn notion_database_id(&self) -> Option<&str> {
        self.file.notion.database_id.as_deref()
    }

    pub fn set_notion_database_id(&mut self, database_id: impl Into<String>) {
        self.file.notion.database_id = Some(database_id.into());
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
