use movies_config::ConfigError;
use movies_models::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid movie: {0}")]
    Validation(#[from] ValidationError),

    /// Stored or fetched data does not have the expected shape
    #[error("schema error: {0}")]
    Schema(String),

    #[error("{count} records share the IMDb id {imdb_id}")]
    AmbiguousRecord { imdb_id: String, count: usize },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("IMDb title {imdb_id} could not be fetched (HTTP {status})")]
    NotFound { imdb_id: String, status: u16 },

    #[error("Notion API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }
}
