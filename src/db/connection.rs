use std::path::Path;

use rusqlite::Connection;

use crate::db::schema::CREATE_SCHEMA;
use crate::error::Result;

/// Database wrapper for the keyword catalog and run history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;\
             PRAGMA synchronous=NORMAL;",
        )?;
        conn.execute_batch(CREATE_SCHEMA)?;
        tracing::debug!(path = %path.display(), "catalog opened");
        Ok(Self { conn })
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(Self { conn })
    }

    /// Access the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Access the underlying connection mutably.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
