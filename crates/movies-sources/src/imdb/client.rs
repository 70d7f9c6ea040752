use movies_models::{validate_imdb_id, Movie};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::error::StoreError;
use crate::imdb::parser::parse_title_page;

pub const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";

/// IMDb serves a reduced page to clients that do not look like a browser
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/50.0.2661.102 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches movie metadata from public IMDb title pages
pub struct ImdbClient {
    client: Client,
}

impl ImdbClient {
    pub fn new() -> Result<Self, StoreError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the title page of `imdb_id` and build an unwatched movie from it
    pub fn fetch(&self, imdb_id: &str) -> Result<Movie, StoreError> {
        validate_imdb_id(imdb_id)?;

        let url = format!("{}/{}/", IMDB_TITLE_URL, imdb_id);
        info!("Fetching IMDb title {}", imdb_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!("IMDb returned {} for {}", status, url);
            return Err(StoreError::NotFound {
                imdb_id: imdb_id.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text()?;
        parse_title_page(imdb_id, &html)
    }
}
