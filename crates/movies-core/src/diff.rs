// Identifier-based comparisons between movie collections

use movies_models::Movie;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Movies from `source` whose IMDb id does not appear in `target`, in source order
pub fn filter_missing_by_imdb_id(source: &[Movie], target: &[Movie]) -> Vec<Movie> {
    let target_ids: HashSet<&str> = target.iter().map(Movie::imdb_id).collect();

    let filtered: Vec<Movie> = source
        .iter()
        .filter(|movie| !target_ids.contains(movie.imdb_id()))
        .cloned()
        .collect();

    debug!(
        "filter_missing_by_imdb_id: source_count={}, target_unique_ids={}, result_count={}",
        source.len(),
        target_ids.len(),
        filtered.len()
    );

    filtered
}

/// IMDb ids stored more than once, with their number of entries, sorted by id
pub fn find_duplicate_ids(movies: &[Movie]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for movie in movies {
        *counts.entry(movie.imdb_id()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, count)| (id.to_string(), count))
        .collect()
}

/// Keep the first movie of every IMDb id
pub fn remove_duplicates_by_imdb_id(movies: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::new();
    let before = movies.len();
    let deduped: Vec<Movie> = movies
        .into_iter()
        .filter(|movie| seen.insert(movie.imdb_id().to_string()))
        .collect();
    if deduped.len() < before {
        debug!("remove_duplicates_by_imdb_id: dropped {} duplicates", before - deduped.len());
    }
    deduped
}
