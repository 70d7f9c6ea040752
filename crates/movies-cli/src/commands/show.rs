use super::AppContext;
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use movies_models::{format_duration, Movie};
use movies_sources::{open_store, StoreKind};
use serde_json::json;

pub fn run_show(imdb_id: &str, kind: StoreKind, ctx: &AppContext, output: &Output) -> Result<()> {
    let store = open_store(&kind, &ctx.settings).wrap_err_with(|| format!("Failed to open {}", kind))?;
    let movie = store
        .select(imdb_id)
        .wrap_err_with(|| format!("Failed to look up {} in {}", imdb_id, kind))?
        .ok_or_else(|| color_eyre::eyre::eyre!("{} is not in {}", imdb_id, kind))?;

    output.table(movie_table(&movie));
    output.json(&json!({"type": "movie", "store": kind.to_string(), "movie": movie}));
    Ok(())
}

pub fn movie_table(movie: &Movie) -> Table {
    let metadata = movie.metadata();
    let viewing = movie.viewing();
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    let flag = |b: bool| if b { "✓" } else { "✗" };

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(&metadata.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(&metadata.imdb_id),
    ]);
    let rows: Vec<(&str, String)> = vec![
        ("Original title", metadata.original_title.clone()),
        ("Release date", date(metadata.release_date)),
        ("Duration", metadata.duration_in_sec.map(format_duration).unwrap_or_default()),
        ("Director", metadata.director.clone()),
        ("Actors", metadata.actors.clone()),
        ("Genres", metadata.genres.join(", ")),
        ("Poster", metadata.poster.clone().unwrap_or_default()),
        ("Watched", flag(viewing.watched).to_string()),
        ("Watched date", date(viewing.watched_date)),
        ("Cinema", flag(viewing.cinema).to_string()),
        ("Rating", viewing.rating.map(|r| format!("{}/10", r)).unwrap_or_default()),
        ("Comment", viewing.comment.clone()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table
}
