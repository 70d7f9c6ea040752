use movies_config::NotionCredentials;
use movies_models::Movie;
use std::time::Duration;
use tracing::{debug, info};
use crate::error::StoreError;
use crate::notion::api::{CreatePageRequest, Filter, HttpNotionApi, NotionApi, QueryRequest};
use crate::notion::codec::{decode_page, encode_page, IMDB_ID};
use crate::notion::document::Page;
use crate::traits::{single_match, Database};

/// Largest page size the query endpoint accepts
pub const PAGE_SIZE: u32 = 100;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Movies stored as pages of a Notion database
pub struct NotionDatabase<A = HttpNotionApi> {
    api: A,
    database_id: String,
}

impl NotionDatabase<HttpNotionApi> {
    pub fn new(credentials: NotionCredentials) -> Result<Self, StoreError> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(credentials: NotionCredentials, timeout: Duration) -> Result<Self, StoreError> {
        let api = HttpNotionApi::new(credentials.token, timeout)?;
        Ok(Self::with_api(api, credentials.database_id))
    }
}

impl<A: NotionApi> NotionDatabase<A> {
    pub fn with_api(api: A, database_id: impl Into<String>) -> Self {
        Self {
            api,
            database_id: database_id.into(),
        }
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run a query and follow its cursor until the last result page
    fn query_all(&self, filter: Option<Filter>) -> Result<Vec<Page>, StoreError> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;
        let mut round = 0;

        loop {
            round += 1;
            let query = QueryRequest {
                filter: filter.clone(),
                start_cursor: cursor.take(),
                page_size: Some(PAGE_SIZE),
            };
            let response = self.api.query_database(&self.database_id, &query)?;
            debug!(
                "Notion query page {}: {} results, has_more={}",
                round,
                response.results.len(),
                response.has_more
            );
            pages.extend(response.results);

            if !response.has_more {
                break;
            }
            match response.next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    return Err(StoreError::schema(
                        "Notion reported more results without a next_cursor",
                    ))
                }
            }
        }

        Ok(pages)
    }
}

impl<A: NotionApi> Database for NotionDatabase<A> {
    fn name(&self) -> &str {
        "notion"
    }

    fn insert(&mut self, movies: &[Movie]) -> Result<(), StoreError> {
        // One request per movie; earlier pages stay if a later one fails
        for movie in movies {
            let request = CreatePageRequest::new(&self.database_id, encode_page(movie));
            let page = self.api.create_page(&request)?;
            debug!(
                "Created Notion page {} for {}",
                page.id.as_deref().unwrap_or("?"),
                movie.imdb_id()
            );
        }
        info!("Inserted {} movies into Notion", movies.len());
        Ok(())
    }

    fn select(&self, imdb_id: &str) -> Result<Option<Movie>, StoreError> {
        let pages = self.query_all(Some(Filter::title_equals(IMDB_ID, imdb_id)))?;
        single_match(imdb_id, pages)?.as_ref().map(decode_page).transpose()
    }

    fn fetchall(&self) -> Result<Vec<Movie>, StoreError> {
        let pages = self.query_all(None)?;
        let movies = pages.iter().map(decode_page).collect::<Result<Vec<_>, _>>()?;
        info!("Fetched {} movies from Notion", movies.len());
        Ok(movies)
    }
}

#[cfg(test)]
mod tests;
