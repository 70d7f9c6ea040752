use super::AppContext;
use crate::output::Output;
use crate::progress::Spinner;
use chrono::NaiveDate;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use movies_models::{validate_imdb_id, Viewing};
use movies_sources::{open_store, ImdbClient, StoreKind};
use serde_json::json;
use std::path::PathBuf;

pub struct AddArgs {
    pub imdb_id: String,
    pub rating: Option<i32>,
    pub watched: bool,
    pub cinema: bool,
    pub date: Option<NaiveDate>,
    pub comment: Option<String>,
    pub notion: bool,
    pub sqlite: Option<Option<PathBuf>>,
}

/// Stores an added movie goes to; Notion unless something else was asked for
///
/// `--sqlite` without a value means the configured default file.
pub fn target_stores(notion: bool, sqlite: Option<Option<PathBuf>>) -> Vec<StoreKind> {
    let mut stores = Vec::new();
    if notion || sqlite.is_none() {
        stores.push(StoreKind::Notion);
    }
    if let Some(path) = sqlite {
        stores.push(StoreKind::Sqlite(path));
    }
    stores
}

pub fn run_add(args: AddArgs, ctx: &AppContext, output: &Output) -> Result<()> {
    tracing::debug!("Add command started for {}", args.imdb_id);

    // Reject bad input before any network round-trip
    validate_imdb_id(&args.imdb_id)?;
    let viewing = Viewing::watched_with(
        args.watched,
        args.date,
        args.cinema,
        args.rating,
        args.comment.unwrap_or_default(),
    );
    viewing.validate()?;

    // Open every target first so missing credentials fail before the fetch
    let mut stores = Vec::new();
    for kind in target_stores(args.notion, args.sqlite) {
        let store = open_store(&kind, &ctx.settings).wrap_err_with(|| format!("Failed to open {}", kind))?;
        stores.push((kind, store));
    }

    let client = ImdbClient::with_timeout(ctx.timeout())?;
    let spinner = Spinner::start(output, format!("Fetching {} from IMDb", args.imdb_id));
    let movie = client
        .fetch(&args.imdb_id)
        .wrap_err_with(|| format!("Failed to fetch {} from IMDb", args.imdb_id))?
        .with_viewing(viewing)?;

    let mut added_to = Vec::new();
    for (kind, store) in &mut stores {
        spinner.set_message(format!("Adding {} to {}", movie.title(), kind));
        if let Err(e) = store.insert_one(&movie) {
            drop(spinner);
            for done in &added_to {
                output.success(format!("Added {} ({}) to {}", movie.title(), movie.imdb_id(), done));
            }
            return Err(e).wrap_err_with(|| format!("Failed to add {} to {}", movie.imdb_id(), kind));
        }
        added_to.push(kind.to_string());
    }
    spinner.finish();

    for kind in &added_to {
        output.success(format!("Added {} ({}) to {}", movie.title(), movie.imdb_id(), kind));
    }

    output.json(&json!({
        "type": "added",
        "stores": added_to,
        "movie": movie,
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_notion_credentials_fail_before_fetch() {
        if std::env::var(movies_config::NOTION_TOKEN_ENV).is_ok() {
            return;
        }
        let dir = tempfile::TempDir::new().unwrap();
        let ctx = AppContext {
            paths: movies_config::PathManager::with_base(dir.path()),
            config: movies_config::Config::default(),
            settings: movies_sources::StoreSettings::default(),
        };
        let output = Output::new(crate::output::OutputFormat::Json, true);
        let args = AddArgs {
            imdb_id: "tt0111161".to_string(),
            rating: None,
            watched: false,
            cinema: false,
            date: None,
            comment: None,
            notion: true,
            sqlite: None,
        };

        let err = run_add(args, &ctx, &output).unwrap_err();
        assert!(err.to_string().contains("Failed to open notion"), "{}", err);
    }

    #[test]
    fn test_target_stores_default_to_notion() {
        assert_eq!(target_stores(false, None), vec![StoreKind::Notion]);
    }

    #[test]
    fn test_target_stores_sqlite_only() {
        assert_eq!(
            target_stores(false, Some(Some(PathBuf::from("movies.db")))),
            vec![StoreKind::Sqlite(Some(PathBuf::from("movies.db")))]
        );
        assert_eq!(target_stores(false, Some(None)), vec![StoreKind::Sqlite(None)]);
    }

    #[test]
    fn test_target_stores_both() {
        assert_eq!(
            target_stores(true, Some(Some(PathBuf::from("movies.db")))),
            vec![StoreKind::Notion, StoreKind::Sqlite(Some(PathBuf::from("movies.db")))]
        );
    }
}
