use crate::credentials::CredentialStore;
use crate::error::ConfigError;
use std::fmt;
use tracing::debug;

pub const NOTION_TOKEN_ENV: &str = "NOTION_AUTH";
pub const NOTION_DATABASE_ENV: &str = "NOTION_DATABASE";

/// Credentials of the Notion integration and the target database
#[derive(Clone, PartialEq, Eq)]
pub struct NotionCredentials {
    pub token: String,
    pub database_id: String,
}

// Keep the token out of logs
impl fmt::Debug for NotionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionCredentials")
            .field("token", &mask_secret(&self.token))
            .field("database_id", &self.database_id)
            .finish()
    }
}

impl NotionCredentials {
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            database_id: database_id.into(),
        }
    }

    /// Resolve from explicit values, then the process environment, then the credentials file
    pub fn resolve(
        token: Option<String>,
        database_id: Option<String>,
        store: Option<&CredentialStore>,
    ) -> Result<Self, ConfigError> {
        Self::resolve_with(token, database_id, |key| std::env::var(key).ok(), store)
    }

    /// Same as [`resolve`](Self::resolve) with an injectable environment lookup
    ///
    /// Each value is resolved on its own: an explicit token can be combined
    /// with a database id coming from the environment. Empty strings count as
    /// unset at every level.
    pub fn resolve_with<F>(
        token: Option<String>,
        database_id: Option<String>,
        env: F,
        store: Option<&CredentialStore>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = pick(
            "token",
            token,
            env(NOTION_TOKEN_ENV),
            store.and_then(|s| s.notion_token().map(str::to_string)),
        )
        .ok_or(ConfigError::MissingCredential {
            name: "Notion token",
            env_var: NOTION_TOKEN_ENV,
        })?;

        let database_id = pick(
            "database_id",
            database_id,
            env(NOTION_DATABASE_ENV),
            store.and_then(|s| s.notion_database_id().map(str::to_string)),
        )
        .ok_or(ConfigError::MissingCredential {
            name: "Notion database id",
            env_var: NOTION_DATABASE_ENV,
        })?;

        Ok(Self { token, database_id })
    }
}

fn pick(
    name: &str,
    explicit: Option<String>,
    from_env: Option<String>,
    from_file: Option<String>,
) -> Option<String> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    if let Some(v) = non_empty(explicit) {
        debug!(credential = name, origin = "argument", "Resolved Notion credential");
        return Some(v);
    }
    if let Some(v) = non_empty(from_env) {
        debug!(credential = name, origin = "environment", "Resolved Notion credential");
        return Some(v);
    }
    let v = non_empty(from_file)?;
    debug!(credential = name, origin = "credentials_file", "Resolved Notion credential");
    Some(v)
}

/// Show only the first few characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
