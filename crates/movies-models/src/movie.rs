use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::ValidationError;
use crate::viewing::Viewing;

/// Number of fields in a [`Movie`]
pub const FIELD_COUNT: usize = 14;

/// Canonical field order of a [`Movie`]
///
/// Every backend that stores movies positionally (the SQLite table columns,
/// the row arrays of the relational codec) uses this order.
pub const MOVIE_FIELDS: [&str; FIELD_COUNT] = [
    "imdb_id",
    "title",
    "original_title",
    "release_date",
    "duration_in_sec",
    "poster",
    "director",
    "actors",
    "genres",
    "rating",
    "watched",
    "watched_date",
    "cinema",
    "comment",
];

/// Descriptive movie data, as published upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub imdb_id: String,
    pub title: String,
    pub original_title: String,
    pub release_date: Option<NaiveDate>,
    pub duration_in_sec: Option<u32>,
    pub poster: Option<String>, // URL
    pub director: String, // comma-joined
    pub actors: String, // comma-joined
    pub genres: Vec<String>,
}

/// A movie: upstream metadata plus the user's own viewing data
///
/// Fields are only reachable through accessors so that a constructed `Movie`
/// always satisfies its invariants:
/// - `imdb_id` and `title` are non-empty
/// - an unwatched movie has no watch date, no cinema flag and no rating
/// - a rating lies in `0..=10`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    #[serde(flatten)]
    metadata: MovieMetadata,
    #[serde(flatten)]
    viewing: Viewing,
}

impl Movie {
    pub fn new(metadata: MovieMetadata, viewing: Viewing) -> Result<Self, ValidationError> {
        if metadata.imdb_id.trim().is_empty() {
            return Err(ValidationError::MissingField("imdb_id"));
        }
        if metadata.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        viewing.validate()?;
        Ok(Self { metadata, viewing })
    }

    /// Fresh movie with default (unwatched) viewing data
    pub fn from_metadata(metadata: MovieMetadata) -> Result<Self, ValidationError> {
        Self::new(metadata, Viewing::default())
    }

    pub fn with_viewing(mut self, viewing: Viewing) -> Result<Self, ValidationError> {
        self.set_viewing(viewing)?;
        Ok(self)
    }

    /// Replace the viewing data, leaving the movie untouched on error
    pub fn set_viewing(&mut self, viewing: Viewing) -> Result<(), ValidationError> {
        viewing.validate()?;
        self.viewing = viewing;
        Ok(())
    }

    pub fn metadata(&self) -> &MovieMetadata {
        &self.metadata
    }

    pub fn viewing(&self) -> &Viewing {
        &self.viewing
    }

    pub fn imdb_id(&self) -> &str {
        &self.metadata.imdb_id
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}

/// Check the `tt` + digits shape of an IMDb title identifier
pub fn validate_imdb_id(imdb_id: &str) -> Result<(), ValidationError> {
    let valid = imdb_id
        .strip_prefix("tt")
        .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidImdbId(imdb_id.to_string()))
    }
}
