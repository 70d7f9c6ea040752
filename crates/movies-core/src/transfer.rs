// Store-to-store copy of movies

use anyhow::{Context, Result};
use movies_sources::Database;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};
use crate::diff::{filter_missing_by_imdb_id, find_duplicate_ids, remove_duplicates_by_imdb_id};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferOptions {
    /// Only insert movies whose IMDb id is not in the target yet (and only once)
    pub skip_existing: bool,
    /// Compute what would be inserted without writing
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub source: String,
    pub target: String,
    pub fetched: usize,
    pub skipped: usize,
    pub inserted: usize,
    /// Ids stored more than once in the source
    pub source_duplicates: Vec<(String, usize)>,
    pub dry_run: bool,
    pub elapsed_ms: u64,
}

/// Copy every movie of `source` into `target`
///
/// The source is read completely before anything is written. Writes go
/// through one `insert` call, so atomicity is whatever the target backend
/// gives a batch.
pub fn transfer(
    source: &dyn Database,
    target: &mut dyn Database,
    options: &TransferOptions,
) -> Result<TransferReport> {
    let start = Instant::now();
    info!("Transferring movies from {} to {}", source.name(), target.name());

    let movies = source
        .fetchall()
        .with_context(|| format!("Failed to fetch movies from {}", source.name()))?;
    let fetched = movies.len();

    let source_duplicates = find_duplicate_ids(&movies);
    if !source_duplicates.is_empty() {
        warn!(
            "{} IMDb ids are stored more than once in {}",
            source_duplicates.len(),
            source.name()
        );
    }

    let pending = if options.skip_existing {
        let existing = target
            .fetchall()
            .with_context(|| format!("Failed to fetch existing movies from {}", target.name()))?;
        remove_duplicates_by_imdb_id(filter_missing_by_imdb_id(&movies, &existing))
    } else {
        movies
    };
    let skipped = fetched - pending.len();

    if options.dry_run {
        info!("Dry run: would insert {} movies into {} ({} skipped)", pending.len(), target.name(), skipped);
    } else if !pending.is_empty() {
        target
            .insert(&pending)
            .with_context(|| format!("Failed to insert movies into {}", target.name()))?;
    }

    let report = TransferReport {
        source: source.name().to_string(),
        target: target.name().to_string(),
        fetched,
        skipped,
        inserted: if options.dry_run { 0 } else { pending.len() },
        source_duplicates,
        dry_run: options.dry_run,
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Transfer finished: {} fetched, {} inserted, {} skipped in {}ms",
        report.fetched, report.inserted, report.skipped, report.elapsed_ms
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use movies_models::{Movie, MovieMetadata, Viewing};
    use movies_sources::SqliteDatabase;

    fn create_movie(imdb_id: &str, title: &str) -> Movie {
        Movie::from_metadata(MovieMetadata {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            original_title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2001, 12, 19),
            duration_in_sec: Some(10680),
            director: "Peter Jackson".to_string(),
            genres: vec!["Adventure".to_string(), "Fantasy".to_string()],
            ..MovieMetadata::default()
        })
        .unwrap()
    }

    fn store(movies: &[Movie]) -> SqliteDatabase {
        let mut db = SqliteDatabase::open_in_memory().unwrap();
        db.insert(movies).unwrap();
        db
    }

    fn sorted(mut movies: Vec<Movie>) -> Vec<Movie> {
        movies.sort_by(|a, b| a.imdb_id().cmp(b.imdb_id()));
        movies
    }

    #[test]
    fn test_transfer_copies_everything() {
        let movies = vec![
            create_movie("tt0120737", "The Fellowship of the Ring"),
            create_movie("tt0167261", "The Two Towers")
                .with_viewing(Viewing {
                    rating: Some(9),
                    watched: true,
                    watched_date: NaiveDate::from_ymd_opt(2002, 12, 18),
                    cinema: true,
                    comment: "premiere".to_string(),
                })
                .unwrap(),
        ];
        let source = store(&movies);
        let mut target = store(&[]);

        let report = transfer(&source, &mut target, &TransferOptions::default()).unwrap();
        assert_eq!(report.fetched, 2);
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.source, "sqlite");
        assert_eq!(sorted(target.fetchall().unwrap()), sorted(movies));
    }

    #[test]
    fn test_transfer_twice_duplicates_without_skip() {
        let source = store(&[create_movie("tt0120737", "The Fellowship of the Ring")]);
        let mut target = store(&[]);

        transfer(&source, &mut target, &TransferOptions::default()).unwrap();
        transfer(&source, &mut target, &TransferOptions::default()).unwrap();
        assert_eq!(target.count().unwrap(), 2);
    }

    #[test]
    fn test_transfer_skip_existing() {
        let source = store(&[
            create_movie("tt0120737", "The Fellowship of the Ring"),
            create_movie("tt0167261", "The Two Towers"),
            create_movie("tt0167260", "The Return of the King"),
        ]);
        let mut target = store(&[create_movie("tt0167261", "The Two Towers")]);
        let options = TransferOptions {
            skip_existing: true,
            ..TransferOptions::default()
        };

        let report = transfer(&source, &mut target, &options).unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(target.count().unwrap(), 3);
        assert!(target.select("tt0167261").unwrap().is_some());

        let report = transfer(&source, &mut target, &options).unwrap();
        assert_eq!(report.inserted, 0);
        assert_eq!(report.skipped, 3);
        assert_eq!(target.count().unwrap(), 3);
    }

    #[test]
    fn test_transfer_skip_existing_collapses_source_duplicates() {
        let fellowship = create_movie("tt0120737", "The Fellowship of the Ring");
        let source = store(&[fellowship.clone(), fellowship]);
        let mut target = store(&[]);
        let options = TransferOptions {
            skip_existing: true,
            ..TransferOptions::default()
        };

        let report = transfer(&source, &mut target, &options).unwrap();
        assert_eq!(report.source_duplicates, vec![("tt0120737".to_string(), 2)]);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_transfer_dry_run_writes_nothing() {
        let source = store(&[create_movie("tt0120737", "The Fellowship of the Ring")]);
        let mut target = store(&[]);
        let options = TransferOptions {
            dry_run: true,
            ..TransferOptions::default()
        };

        let report = transfer(&source, &mut target, &options).unwrap();
        assert!(report.dry_run);
        assert_eq!(report.inserted, 0);
        assert_eq!(report.fetched, 1);
        assert_eq!(target.count().unwrap(), 0);
    }

    #[test]
    fn test_transfer_empty_source() {
        let source = store(&[]);
        let mut target = store(&[create_movie("tt0120737", "The Fellowship of the Ring")]);

        let report = transfer(&source, &mut target, &TransferOptions::default()).unwrap();
        assert_eq!(report.fetched, 0);
        assert_eq!(report.inserted, 0);
        assert_eq!(target.count().unwrap(), 1);
    }
}
