pub mod config;
pub mod credentials;
pub mod error;
pub mod notion;
pub mod paths;

pub use config::{Config, HttpConfig, SqliteConfig};
pub use credentials::CredentialStore;
pub use error::ConfigError;
pub use notion::{mask_secret, NotionCredentials, NOTION_DATABASE_ENV, NOTION_TOKEN_ENV};
pub use paths::{base_path_override, PathManager, BASE_PATH_ENV};
