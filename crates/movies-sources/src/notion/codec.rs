//! Movie <-> Notion page
//!
//! Durations are stored as `"<H>h<MM>"` text, so a round trip through Notion
//! keeps whole minutes only.

use chrono::NaiveDate;
use movies_models::{format_duration, parse_duration, Movie, MovieMetadata, Viewing};
use std::collections::BTreeMap;
use crate::error::StoreError;
use crate::notion::document::{Cover, DateValue, ExternalFile, Page, PropertyValue, RichText, SelectOption};

pub const IMDB_ID: &str = "IMDb id";
pub const TITLE: &str = "Title";
pub const ORIGINAL_TITLE: &str = "Original title";
pub const RELEASE_DATE: &str = "Release date";
pub const DURATION: &str = "Duration";
pub const DIRECTOR: &str = "Director";
pub const ACTORS: &str = "Actors";
pub const GENRES: &str = "Genres";
pub const RATING: &str = "Rating";
pub const WATCHED: &str = "Watched";
pub const WATCHED_DATE: &str = "Watched date";
pub const CINEMA: &str = "Cinema";
pub const COMMENT: &str = "Comment";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_page(movie: &Movie) -> Page {
    let metadata = movie.metadata();
    let viewing = movie.viewing();

    let mut properties = BTreeMap::new();
    properties.insert(IMDB_ID.to_string(), PropertyValue::title(&metadata.imdb_id));
    properties.insert(TITLE.to_string(), PropertyValue::rich_text(&metadata.title));
    properties.insert(ORIGINAL_TITLE.to_string(), PropertyValue::rich_text(&metadata.original_title));
    properties.insert(
        DURATION.to_string(),
        PropertyValue::rich_text(&metadata.duration_in_sec.map(format_duration).unwrap_or_default()),
    );
    properties.insert(DIRECTOR.to_string(), PropertyValue::rich_text(&metadata.director));
    properties.insert(ACTORS.to_string(), PropertyValue::rich_text(&metadata.actors));
    properties.insert(
        GENRES.to_string(),
        PropertyValue::MultiSelect {
            multi_select: metadata
                .genres
                .iter()
                .map(|name| SelectOption { name: name.clone() })
                .collect(),
        },
    );
    properties.insert(
        RATING.to_string(),
        PropertyValue::Number { number: viewing.rating.map(f64::from) },
    );
    properties.insert(WATCHED.to_string(), PropertyValue::Checkbox { checkbox: viewing.watched });
    properties.insert(CINEMA.to_string(), PropertyValue::Checkbox { checkbox: viewing.cinema });
    properties.insert(COMMENT.to_string(), PropertyValue::rich_text(&viewing.comment));
    if let Some(date) = metadata.release_date {
        properties.insert(RELEASE_DATE.to_string(), date_property(date));
    }
    if let Some(date) = viewing.watched_date {
        properties.insert(WATCHED_DATE.to_string(), date_property(date));
    }

    Page {
        id: None,
        properties,
        cover: metadata.poster.as_ref().map(|url| Cover::External {
            external: ExternalFile { url: url.clone() },
        }),
    }
}

pub fn decode_page(page: &Page) -> Result<Movie, StoreError> {
    let imdb_id = required_text(page, IMDB_ID)?;
    let title = required_text(page, TITLE)?;

    let duration = text(page, DURATION)?;
    let duration_in_sec = if duration.trim().is_empty() {
        None
    } else {
        Some(parse_duration(&duration).ok_or_else(|| {
            StoreError::schema(format!("property {} holds malformed duration '{}'", DURATION, duration))
        })?)
    };

    let poster = match &page.cover {
        Some(Cover::External { external }) => Some(external.url.clone()),
        _ => None,
    };

    let metadata = MovieMetadata {
        imdb_id,
        title,
        original_title: text(page, ORIGINAL_TITLE)?,
        release_date: date(page, RELEASE_DATE)?,
        duration_in_sec,
        poster,
        director: text(page, DIRECTOR)?,
        actors: text(page, ACTORS)?,
        genres: multi_select(page, GENRES)?,
    };
    let viewing = Viewing {
        rating: rating(page)?,
        watched: checkbox(page, WATCHED)?,
        watched_date: date(page, WATCHED_DATE)?,
        cinema: checkbox(page, CINEMA)?,
        comment: text(page, COMMENT)?,
    };
    Ok(Movie::new(metadata, viewing)?)
}

fn date_property(date: NaiveDate) -> PropertyValue {
    PropertyValue::Date {
        date: Some(DateValue { start: Some(date.format(DATE_FORMAT).to_string()) }),
    }
}

fn wrong_kind(name: &str, expected: &str, value: &PropertyValue) -> StoreError {
    StoreError::schema(format!(
        "property {} should be {} but is {}",
        name,
        expected,
        value.kind()
    ))
}

fn required_text(page: &Page, name: &str) -> Result<String, StoreError> {
    let value = match page.properties.get(name) {
        Some(PropertyValue::Title { title }) => RichText::concat(title),
        Some(PropertyValue::RichText { rich_text }) => RichText::concat(rich_text),
        Some(other) => return Err(wrong_kind(name, "text", other)),
        None => return Err(StoreError::schema(format!("page has no {} property", name))),
    };
    if value.trim().is_empty() {
        return Err(StoreError::schema(format!("property {} is empty", name)));
    }
    Ok(value)
}

fn text(page: &Page, name: &str) -> Result<String, StoreError> {
    match page.properties.get(name) {
        Some(PropertyValue::RichText { rich_text }) => Ok(RichText::concat(rich_text)),
        Some(other) => Err(wrong_kind(name, "rich_text", other)),
        None => Ok(String::new()),
    }
}

fn checkbox(page: &Page, name: &str) -> Result<bool, StoreError> {
    match page.properties.get(name) {
        Some(PropertyValue::Checkbox { checkbox }) => Ok(*checkbox),
        Some(other) => Err(wrong_kind(name, "checkbox", other)),
        None => Ok(false),
    }
}

fn multi_select(page: &Page, name: &str) -> Result<Vec<String>, StoreError> {
    match page.properties.get(name) {
        Some(PropertyValue::MultiSelect { multi_select }) => {
            Ok(multi_select.iter().map(|option| option.name.clone()).collect())
        }
        Some(other) => Err(wrong_kind(name, "multi_select", other)),
        None => Ok(Vec::new()),
    }
}

fn rating(page: &Page) -> Result<Option<i32>, StoreError> {
    let number = match page.properties.get(RATING) {
        Some(PropertyValue::Number { number }) => *number,
        Some(other) => return Err(wrong_kind(RATING, "number", other)),
        None => None,
    };
    number
        .map(|n| {
            if n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
                Ok(n as i32)
            } else {
                Err(StoreError::schema(format!("property {} holds non-integral rating {}", RATING, n)))
            }
        })
        .transpose()
}

fn date(page: &Page, name: &str) -> Result<Option<NaiveDate>, StoreError> {
    let start = match page.properties.get(name) {
        Some(PropertyValue::Date { date }) => date.as_ref().and_then(|d| d.start.as_deref()),
        Some(other) => return Err(wrong_kind(name, "date", other)),
        None => None,
    };
    start
        .map(|s| {
            // Date-time values carry a time part after the date
            let day = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(day, DATE_FORMAT)
                .map_err(|e| StoreError::schema(format!("property {} holds invalid date '{}': {}", name, s, e)))
        })
        .transpose()
}
