use super::{prompts, AppContext};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use movies_config::{mask_secret, CredentialStore, NOTION_DATABASE_ENV, NOTION_TOKEN_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub enum ConfigAction {
    Show { full: bool },
    Notion { token: Option<String>, database_id: Option<String> },
}

pub fn run_config(action: ConfigAction, ctx: &AppContext, output: &Output) -> Result<()> {
    match action {
        ConfigAction::Show { full } => show_config(full, ctx, output),
        ConfigAction::Notion { token, database_id } => configure_notion(token, database_id, ctx, output),
    }
}

/// Where a Notion credential currently comes from, without the argument level
fn credential_origin(env_var: &str, stored: Option<&str>) -> (&'static str, Option<String>) {
    if let Some(value) = std::env::var(env_var).ok().filter(|v| !v.trim().is_empty()) {
        return ("environment", Some(value));
    }
    match stored.filter(|v| !v.trim().is_empty()) {
        Some(value) => ("credentials file", Some(value.to_string())),
        None => ("not set", None),
    }
}

fn show_config(full: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let credentials_file = ctx.paths.credentials_file();
    let stored = ctx.settings.credentials.as_ref();

    let (token_origin, token) = credential_origin(NOTION_TOKEN_ENV, stored.and_then(|s| s.notion_token()));
    let (database_origin, database_id) =
        credential_origin(NOTION_DATABASE_ENV, stored.and_then(|s| s.notion_database_id()));
    let token_display = token
        .as_deref()
        .map(|t| if full { t.to_string() } else { mask_secret(t) });

    output.json(&json!({
        "type": "config",
        "config_file": config_file,
        "config_file_exists": config_file.exists(),
        "credentials_file": credentials_file,
        "sqlite": {"path": ctx.settings.default_sqlite_path},
        "http": {"timeout_secs": ctx.config.http.timeout_secs},
        "notion": {
            "token": token_display,
            "token_origin": token_origin,
            "database_id": database_id,
            "database_id_origin": database_origin,
        },
    }));

    if !output.is_human() || output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {} (using defaults)", config_file.display()));
    }

    let mut files = Table::new();
    files.set_header(vec![Cell::new("Files").fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    files.add_row(vec![Cell::new("Config"), Cell::new(config_file.display().to_string())]);
    files.add_row(vec![Cell::new("Credentials"), Cell::new(credentials_file.display().to_string())]);
    output.table(files);

    let mut stores = Table::new();
    stores.set_header(vec![Cell::new("Stores").fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    stores.add_row(vec![
        Cell::new("SQLite database"),
        Cell::new(ctx.settings.default_sqlite_path.display().to_string()),
    ]);
    stores.add_row(vec![
        Cell::new("HTTP timeout"),
        Cell::new(format!("{}s", ctx.config.http.timeout_secs)),
    ]);
    stores.add_row(vec![
        Cell::new("Notion token"),
        Cell::new(match &token_display {
            Some(t) => format!("{} ({})", t, token_origin),
            None => "not set".red().to_string(),
        }),
    ]);
    stores.add_row(vec![
        Cell::new("Notion database"),
        Cell::new(match &database_id {
            Some(id) => format!("{} ({})", id, database_origin),
            None => "not set".red().to_string(),
        }),
    ]);
    output.table(stores);

    Ok(())
}

fn configure_notion(
    token: Option<String>,
    database_id: Option<String>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let interactive = token.is_none() && database_id.is_none();
    let token = match token {
        Some(t) => Some(t),
        None if interactive => Some(prompts::notion_token()?),
        None => None,
    };
    let database_id = match database_id {
        Some(id) => Some(id),
        None if interactive => {
            let current = store.notion_database_id().map(str::to_string);
            Some(prompts::notion_database_id(current.as_deref())?)
        }
        None => None,
    };

    let mut changed = Vec::new();
    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        store.set_notion_token(token.trim());
        changed.push("token");
    }
    if let Some(id) = database_id.filter(|id| !id.trim().is_empty()) {
        store.set_notion_database_id(id.trim());
        changed.push("database id");
    }

    if changed.is_empty() {
        output.warn("Nothing to save");
        return Ok(());
    }

    store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
    tracing::info!("Saved Notion {} to {}", changed.join(" and "), credentials_file.display());
    output.success(format!(
        "Saved Notion {} to {}",
        changed.join(" and "),
        credentials_file.display()
    ));
    Ok(())
}
