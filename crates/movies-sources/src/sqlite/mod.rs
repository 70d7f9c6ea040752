pub mod codec;
pub mod database;

pub use database::SqliteDatabase;
