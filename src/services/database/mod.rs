// Database service module
// SQLite connection handling and schema inspection

use anyhow::{Context, Result};
use rusqlite::Connection;

pub mod metadata;

/// Thin wrapper around a SQLite connection holding calendar records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use calendar_grid::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self { conn })
    }

    /// Provides access to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
