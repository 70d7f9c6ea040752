use super::AppContext;
use crate::output::Output;
use crate::progress::Spinner;
use chrono::Datelike;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use movies_core::find_duplicate_ids;
use movies_models::{format_duration, Movie};
use movies_sources::{open_store, StoreKind};
use serde_json::json;

pub fn run_list(kind: StoreKind, ctx: &AppContext, output: &Output) -> Result<()> {
    let store = open_store(&kind, &ctx.settings).wrap_err_with(|| format!("Failed to open {}", kind))?;

    let spinner = Spinner::start(output, format!("Reading movies from {}", kind));
    let fetched = store.fetchall();
    spinner.finish();
    let mut movies = fetched.wrap_err_with(|| format!("Failed to read movies from {}", kind))?;
    movies.sort_by(|a, b| {
        a.metadata()
            .release_date
            .cmp(&b.metadata().release_date)
            .then_with(|| a.title().cmp(b.title()))
    });

    let duplicates = find_duplicate_ids(&movies);

    output.table(movies_table(&movies));
    output.info(format!("{} movies in {}", movies.len(), kind));
    for (imdb_id, count) in &duplicates {
        output.warn(format!("{} is stored {} times", imdb_id, count));
    }
    output.json(&json!({
        "type": "list",
        "store": kind.to_string(),
        "count": movies.len(),
        "movies": movies,
        "duplicates": duplicates
            .iter()
            .map(|(imdb_id, count)| json!({"imdb_id": imdb_id, "count": count}))
            .collect::<Vec<_>>(),
    }));
    Ok(())
}

pub fn movies_table(movies: &[Movie]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["IMDb id", "Title", "Year", "Duration", "Watched", "Date", "Cinema", "Rating"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for movie in movies {
        let metadata = movie.metadata();
        let viewing = movie.viewing();
        table.add_row(vec![
            metadata.imdb_id.clone(),
            metadata.title.clone(),
            metadata.release_date.map(|d| d.year().to_string()).unwrap_or_default(),
            metadata.duration_in_sec.map(format_duration).unwrap_or_default(),
            if viewing.watched { "✓" } else { "" }.to_string(),
            viewing.watched_date.map(|d| d.to_string()).unwrap_or_default(),
            if viewing.cinema { "✓" } else { "" }.to_string(),
            viewing.rating.map(|r| r.to_string()).unwrap_or_default(),
        ]);
    }
    table
}
