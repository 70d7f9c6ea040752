//! Title page parsing
//!
//! IMDb title pages embed their data as JSON in a `__NEXT_DATA__` script
//! tag. Everything but the title is optional there and degrades to an empty
//! value when missing.

use chrono::NaiveDate;
use movies_models::{Movie, MovieMetadata};
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::StoreError;

const NEXT_DATA_SELECTOR: &str = "script#__NEXT_DATA__";
const CREDIT_SEPARATOR: &str = ", ";

#[derive(Debug, Deserialize)]
struct NextData {
    props: Props,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Props {
    page_props: PageProps,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageProps {
    above_the_fold_data: Option<AboveTheFold>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboveTheFold {
    title_text: Option<TextNode>,
    original_title_text: Option<TextNode>,
    runtime: Option<Runtime>,
    primary_image: Option<Image>,
    release_date: Option<ReleaseDate>,
    genres: Option<Genres>,
    principal_credits: Option<Vec<CreditGroup>>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    text: String,
}

#[derive(Debug, Deserialize)]
struct Runtime {
    seconds: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDate {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Genres {
    genres: Option<Vec<TextNode>>,
}

#[derive(Debug, Deserialize)]
struct CreditGroup {
    category: TextNode,
    credits: Option<Vec<Credit>>,
}

#[derive(Debug, Deserialize)]
struct Credit {
    name: CreditName,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreditName {
    name_text: TextNode,
}

/// Build a movie from the HTML of an IMDb title page
pub fn parse_title_page(imdb_id: &str, html: &str) -> Result<Movie, StoreError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(NEXT_DATA_SELECTOR)
        .map_err(|e| StoreError::schema(format!("invalid selector {}: {:?}", NEXT_DATA_SELECTOR, e)))?;
    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| StoreError::schema(format!("no {} script on the title page of {}", NEXT_DATA_SELECTOR, imdb_id)))?;
    let json: String = script.text().collect();

    let data: NextData = serde_json::from_str(&json)
        .map_err(|e| StoreError::schema(format!("unexpected title page payload for {}: {}", imdb_id, e)))?;
    let data = data
        .props
        .page_props
        .above_the_fold_data
        .ok_or_else(|| StoreError::schema(format!("title page of {} has no aboveTheFoldData", imdb_id)))?;

    let title = data
        .title_text
        .map(|t| t.text)
        .ok_or_else(|| StoreError::schema(format!("title page of {} has no titleText", imdb_id)))?;
    let original_title = data
        .original_title_text
        .map(|t| t.text)
        .unwrap_or_else(|| title.clone());

    let credits = data.principal_credits.unwrap_or_default();
    let director = credit_names(&credits, &["Director", "Directors"]);
    let actors = credit_names(&credits, &["Stars", "Star"]);

    let metadata = MovieMetadata {
        imdb_id: imdb_id.to_string(),
        title,
        original_title,
        release_date: data.release_date.and_then(|d| release_date(imdb_id, d)),
        duration_in_sec: data.runtime.and_then(|r| r.seconds),
        poster: data.primary_image.and_then(|i| i.url),
        director,
        actors,
        genres: data
            .genres
            .and_then(|g| g.genres)
            .unwrap_or_default()
            .into_iter()
            .map(|g| g.text)
            .collect(),
    };
    debug!("Parsed IMDb title {}: {}", imdb_id, metadata.title);

    Ok(Movie::from_metadata(metadata)?)
}

/// Names of the first credit group whose category is one of `categories`
fn credit_names(groups: &[CreditGroup], categories: &[&str]) -> String {
    groups
        .iter()
        .find(|group| categories.contains(&group.category.text.as_str()))
        .and_then(|group| group.credits.as_ref())
        .map(|credits| {
            credits
                .iter()
                .map(|c| c.name.name_text.text.as_str())
                .collect::<Vec<_>>()
                .join(CREDIT_SEPARATOR)
        })
        .unwrap_or_default()
}

/// Release dates may be known only to the year or month; the missing parts
/// become the first day of the known period
fn release_date(imdb_id: &str, date: ReleaseDate) -> Option<NaiveDate> {
    let year = date.year?;
    let parsed = NaiveDate::from_ymd_opt(year, date.month.unwrap_or(1), date.day.unwrap_or(1));
    if parsed.is_none() {
        warn!("Ignoring invalid release date {:?} for {}", date, imdb_id);
    }
    parsed
}

#[cfg(test)]
mod tests;
