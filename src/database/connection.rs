//! SQLite connection for the session store.
//!
//! [`Database`] wraps a `rusqlite::Connection` and brings the schema up to
//! date every time it is opened.

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use super::migrations;
use crate::platform;
use crate::types::errors::StoreError;

/// Owned SQLite connection with migrations applied.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and runs migrations.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open(path)?)
    }

    /// Opens the database at the platform data directory, creating the directory first.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = platform::default_session_db_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        log::info!("Opening session database at {}", path.display());
        Ok(Self::open(path)?)
    }

    /// Opens a throwaway in-memory database, used by tests and the demo.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> i32 {
        migrations::get_schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
