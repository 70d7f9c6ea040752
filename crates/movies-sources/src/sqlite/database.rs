use movies_models::{Movie, FIELD_COUNT, MOVIE_FIELDS};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::path::Path;
use tracing::{debug, info};
use crate::error::StoreError;
use crate::sqlite::codec::{decode_row, encode_row, SqlRow};
use crate::traits::{single_match, Database};

pub const TABLE_NAME: &str = "movies";

/// Movies stored in a single `movies` table of a local SQLite file
///
/// Columns carry no declared types; values keep SQLite's dynamic typing. The
/// connection is held for the lifetime of the value and closed on drop.
pub struct SqliteDatabase {
    location: String,
    conn: Connection,
}

impl SqliteDatabase {
    /// Open (creating if needed) the database file and make sure the table exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        Self::from_connection(conn, path.display().to_string())
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?, ":memory:".to_string())
    }

    fn from_connection(conn: Connection, location: String) -> Result<Self, StoreError> {
        conn.execute(&create_table_sql(), [])?;
        debug!(location = %location, table = TABLE_NAME, "Opened SQLite database");
        Ok(Self { location, conn })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", TABLE_NAME), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query_rows(&self, sql: &str, params: &[&str]) -> Result<Vec<SqlRow>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut raw = Vec::new();
        while let Some(row) = rows.next()? {
            raw.push(read_row(row)?);
        }
        Ok(raw)
    }
}

impl Database for SqliteDatabase {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn insert(&mut self, movies: &[Movie]) -> Result<(), StoreError> {
        // One transaction: the whole batch is written or none of it
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql())?;
            for movie in movies {
                stmt.execute(params_from_iter(encode_row(movie)))?;
                debug!(imdb_id = %movie.imdb_id(), "Inserted movie row");
            }
        }
        tx.commit()?;
        info!(location = %self.location, count = movies.len(), "Inserted movies into SQLite");
        Ok(())
    }

    fn select(&self, imdb_id: &str) -> Result<Option<Movie>, StoreError> {
        let sql = format!("{} WHERE imdb_id = ?1", select_sql());
        let rows = self.query_rows(&sql, &[imdb_id])?;
        single_match(imdb_id, rows)?.map(decode_row).transpose()
    }

    fn fetchall(&self) -> Result<Vec<Movie>, StoreError> {
        let movies = self
            .query_rows(&select_sql(), &[])?
            .into_iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, _>>()?;
        info!(location = %self.location, count = movies.len(), "Fetched all movies from SQLite");
        Ok(movies)
    }
}

fn create_table_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {}({})",
        TABLE_NAME,
        MOVIE_FIELDS.join(", ")
    )
}

fn insert_sql() -> String {
    let placeholders: Vec<String> = (1..=FIELD_COUNT).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {}({}) VALUES({})",
        TABLE_NAME,
        MOVIE_FIELDS.join(", "),
        placeholders.join(", ")
    )
}

fn select_sql() -> String {
    format!("SELECT {} FROM {}", MOVIE_FIELDS.join(", "), TABLE_NAME)
}

fn read_row(row: &Row<'_>) -> Result<SqlRow, StoreError> {
    let values = (0..FIELD_COUNT)
        .map(|i| row.get::<_, Value>(i))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    values
        .try_into()
        .map_err(|v: Vec<Value>| StoreError::schema(format!("expected {} columns, got {}", FIELD_COUNT, v.len())))
}
