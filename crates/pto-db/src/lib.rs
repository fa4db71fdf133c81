//! Storage layer for the break timer.
//!
//! Provides a small key-value table in `SQLite` (via `rusqlite`) that backs
//! the session history.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved to the thread that owns the session store but cannot be
//! shared across threads without external synchronization.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! `updated_at` is stored as TEXT in ISO 8601 format (e.g., `2024-01-15T10:30:00Z`),
//! always UTC, so lexicographic ordering matches chronological ordering.
//!
//! ## Values
//!
//! Values are opaque BLOBs. The session history is a JSON array written by
//! `pto-core`; this crate never looks inside it.

use std::path::Path;

use pto_core::HistoryStorage;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Keys must be non-empty.
    #[error("key cannot be empty")]
    EmptyKey,
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- kv table: one row per stored value
            -- updated_at: ISO 8601 format (e.g., '2024-01-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&mut self, key: &str, value: &[u8]) -> Result<(), DbError> {
        if key.is_empty() {
            return Err(DbError::EmptyKey);
        }
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at)
            VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    /// When `key` was last written, as an ISO 8601 string.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, DbError> {
        let updated_at = self
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(updated_at)
    }
}

impl HistoryStorage for Database {
    type Error = DbError;

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        self.get(key)
    }

    fn write(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.put(key, value)
    }
}
