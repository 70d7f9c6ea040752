//! Movie <-> flat SQLite row
//!
//! Rows follow [`MOVIE_FIELDS`](movies_models::MOVIE_FIELDS) order. Genres are
//! stored as one `", "`-joined string, dates as `YYYY-MM-DD` text and booleans
//! as `0`/`1`. Absent optional values are NULL.

use chrono::NaiveDate;
use movies_models::{Movie, MovieMetadata, Viewing, FIELD_COUNT};
use rusqlite::types::Value;
use crate::error::StoreError;

pub type SqlRow = [Value; FIELD_COUNT];

pub const GENRE_SEPARATOR: &str = ", ";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_row(movie: &Movie) -> SqlRow {
    let metadata = movie.metadata();
    let viewing = movie.viewing();
    [
        Value::Text(metadata.imdb_id.clone()),
        Value::Text(metadata.title.clone()),
        Value::Text(metadata.original_title.clone()),
        date_value(metadata.release_date),
        metadata
            .duration_in_sec
            .map(|secs| Value::Integer(i64::from(secs)))
            .unwrap_or(Value::Null),
        metadata.poster.clone().map(Value::Text).unwrap_or(Value::Null),
        Value::Text(metadata.director.clone()),
        Value::Text(metadata.actors.clone()),
        // An empty list is stored as NULL so it never reads back as [""]
        if metadata.genres.is_empty() {
            Value::Null
        } else {
            Value::Text(metadata.genres.join(GENRE_SEPARATOR))
        },
        viewing
            .rating
            .map(|r| Value::Integer(i64::from(r)))
            .unwrap_or(Value::Null),
        Value::Integer(i64::from(viewing.watched)),
        date_value(viewing.watched_date),
        Value::Integer(i64::from(viewing.cinema)),
        Value::Text(viewing.comment.clone()),
    ]
}

pub fn decode_row(row: SqlRow) -> Result<Movie, StoreError> {
    let [imdb_id, title, original_title, release_date, duration_in_sec, poster, director, actors, genres, rating, watched, watched_date, cinema, comment] =
        row;

    let duration_in_sec = optional_integer("duration_in_sec", duration_in_sec)?
        .map(|secs| {
            u32::try_from(secs)
                .map_err(|_| StoreError::schema(format!("duration_in_sec {} is out of range", secs)))
        })
        .transpose()?;
    let rating = optional_integer("rating", rating)?
        .map(|r| {
            i32::try_from(r).map_err(|_| StoreError::schema(format!("rating {} is out of range", r)))
        })
        .transpose()?;

    let metadata = MovieMetadata {
        imdb_id: required_text("imdb_id", imdb_id)?,
        title: required_text("title", title)?,
        original_title: text("original_title", original_title)?,
        release_date: optional_date("release_date", release_date)?,
        duration_in_sec,
        poster: optional_text("poster", poster)?,
        director: text("director", director)?,
        actors: text("actors", actors)?,
        genres: split_genres(optional_text("genres", genres)?),
    };
    let viewing = Viewing {
        rating,
        watched: boolean("watched", watched)?,
        watched_date: optional_date("watched_date", watched_date)?,
        cinema: boolean("cinema", cinema)?,
        comment: text("comment", comment)?,
    };
    Ok(Movie::new(metadata, viewing)?)
}

/// Split a stored genre string; NULL and empty text both mean "no genres"
pub fn split_genres(genres: Option<String>) -> Vec<String> {
    match genres {
        Some(s) if !s.is_empty() => s.split(GENRE_SEPARATOR).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn date_value(date: Option<NaiveDate>) -> Value {
    date.map(|d| Value::Text(d.format(DATE_FORMAT).to_string()))
        .unwrap_or(Value::Null)
}

fn wrong_type(field: &str, value: &Value) -> StoreError {
    StoreError::schema(format!(
        "column {} has unexpected type {}",
        field,
        value.data_type()
    ))
}

fn required_text(field: &str, value: Value) -> Result<String, StoreError> {
    match value {
        Value::Text(s) if !s.is_empty() => Ok(s),
        Value::Null | Value::Text(_) => Err(StoreError::schema(format!("required column {} is empty", field))),
        other => Err(wrong_type(field, &other)),
    }
}

fn text(field: &str, value: Value) -> Result<String, StoreError> {
    Ok(optional_text(field, value)?.unwrap_or_default())
}

fn optional_text(field: &str, value: Value) -> Result<Option<String>, StoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s)),
        other => Err(wrong_type(field, &other)),
    }
}

fn optional_integer(field: &str, value: Value) -> Result<Option<i64>, StoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(i)),
        other => Err(wrong_type(field, &other)),
    }
}

fn boolean(field: &str, value: Value) -> Result<bool, StoreError> {
    Ok(optional_integer(field, value)?.map(|i| i != 0).unwrap_or(false))
}

fn optional_date(field: &str, value: Value) -> Result<Option<NaiveDate>, StoreError> {
    optional_text(field, value)?
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT)
                .map_err(|e| StoreError::schema(format!("column {} holds invalid date '{}': {}", field, s, e)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> MovieMetadata {
        MovieMetadata {
            imdb_id: "tt0068646".to_string(),
            title: "The Godfather".to_string(),
            original_title: "The Godfather".to_string(),
            release_date: NaiveDate::from_ymd_opt(1972, 3, 24),
            duration_in_sec: Some(10500),
            poster: Some("https://example.com/godfather.jpg".to_string()),
            director: "Francis Ford Coppola".to_string(),
            actors: "Marlon Brando, Al Pacino, James Caan".to_string(),
            genres: vec!["Crime".to_string(), "Drama".to_string()],
        }
    }

    fn watched_movie() -> Movie {
        Movie::new(
            metadata(),
            Viewing {
                rating: Some(9),
                watched: true,
                watched_date: NaiveDate::from_ymd_opt(2023, 11, 2),
                cinema: true,
                comment: "re-release".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_encode_row_layout() {
        let row = encode_row(&watched_movie());
        assert_eq!(row[0], Value::Text("tt0068646".to_string()));
        assert_eq!(row[3], Value::Text("1972-03-24".to_string()));
        assert_eq!(row[4], Value::Integer(10500));
        assert_eq!(row[8], Value::Text("Crime, Drama".to_string()));
        assert_eq!(row[9], Value::Integer(9));
        assert_eq!(row[10], Value::Integer(1));
        assert_eq!(row[11], Value::Text("2023-11-02".to_string()));
        assert_eq!(row[12], Value::Integer(1));
    }

    #[test]
    fn test_round_trip_watched() {
        let movie = watched_movie();
        assert_eq!(decode_row(encode_row(&movie)).unwrap(), movie);
    }

    #[test]
    fn test_round_trip_sparse() {
        let movie = Movie::from_metadata(MovieMetadata {
            imdb_id: "tt9999999".to_string(),
            title: "Unknown".to_string(),
            ..MovieMetadata::default()
        })
        .unwrap();
        let row = encode_row(&movie);
        assert_eq!(row[3], Value::Null);
        assert_eq!(row[4], Value::Null);
        assert_eq!(row[5], Value::Null);
        assert_eq!(row[8], Value::Null);
        assert_eq!(row[9], Value::Null);
        assert_eq!(decode_row(row).unwrap(), movie);
    }

    #[test]
    fn test_split_genres() {
        assert_eq!(split_genres(None), Vec::<String>::new());
        assert_eq!(split_genres(Some(String::new())), Vec::<String>::new());
        assert_eq!(split_genres(Some("Drama".to_string())), vec!["Drama".to_string()]);
        assert_eq!(
            split_genres(Some("Crime, Drama".to_string())),
            vec!["Crime".to_string(), "Drama".to_string()]
        );
    }

    #[test]
    fn test_decode_missing_identifier() {
        let mut row = encode_row(&watched_movie());
        row[0] = Value::Null;
        assert!(matches!(decode_row(row), Err(StoreError::Schema(_))));

        let mut row = encode_row(&watched_movie());
        row[1] = Value::Text(String::new());
        assert!(matches!(decode_row(row), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_decode_invalid_date() {
        let mut row = encode_row(&watched_movie());
        row[11] = Value::Text("02/11/2023".to_string());
        assert!(matches!(decode_row(row), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_decode_wrong_type() {
        let mut row = encode_row(&watched_movie());
        row[4] = Value::Text("2h55".to_string());
        assert!(matches!(decode_row(row), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_invariant_violation() {
        let mut row = encode_row(&watched_movie());
        row[10] = Value::Integer(0);
        assert!(matches!(decode_row(row), Err(StoreError::Validation(_))));
    }
}
