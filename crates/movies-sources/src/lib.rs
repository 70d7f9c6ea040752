pub mod error;
pub mod factory;
pub mod imdb;
pub mod notion;
pub mod sqlite;
pub mod traits;

pub use error::StoreError;
pub use factory::{open_store, StoreKind, StoreSettings};
pub use imdb::{parse_title_page, ImdbClient};
pub use notion::{HttpNotionApi, NotionApi, NotionDatabase};
pub use sqlite::SqliteDatabase;
pub use traits::Database;
