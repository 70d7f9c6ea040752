pub mod api;
pub mod codec;
pub mod database;
pub mod document;

pub use api::{HttpNotionApi, NotionApi};
pub use database::NotionDatabase;
