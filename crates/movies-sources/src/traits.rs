use movies_models::Movie;
use crate::error::StoreError;

/// A store that movies can be written to and read back from
///
/// Every call blocks until the backing store has answered. Writes are durable
/// when `insert` returns.
pub trait Database {
    // Backend name, used in logs and user-facing messages
    fn name(&self) -> &str;

    /// Persist movies in the given order
    ///
    /// There is no uniqueness check: inserting a movie whose IMDb id is
    /// already stored creates a second entry.
    fn insert(&mut self, movies: &[Movie]) -> Result<(), StoreError>;

    /// Find the movie with the given IMDb id
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// [`StoreError::AmbiguousRecord`] when several entries share the id.
    fn select(&self, imdb_id: &str) -> Result<Option<Movie>, StoreError>;

    /// Every stored movie, in backend-defined order
    fn fetchall(&self) -> Result<Vec<Movie>, StoreError>;

    fn insert_one(&mut self, movie: &Movie) -> Result<(), StoreError> {
        self.insert(std::slice::from_ref(movie))
    }
}

/// Turn the entries matching an IMDb id into at most one
///
/// Works on raw entries so that duplicates are reported before any decoding.
pub(crate) fn single_match<T>(imdb_id: &str, mut matches: Vec<T>) -> Result<Option<T>, StoreError> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        count => Err(StoreError::AmbiguousRecord {
            imdb_id: imdb_id.to_string(),
            count,
        }),
    }
}
