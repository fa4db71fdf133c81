//! Durable key-value storage used for the session history.

use std::collections::HashMap;
use std::convert::Infallible;

/// Key holding the serialized history.
pub const HISTORY_KEY: &str = "sessions";

/// A key-value byte store.
///
/// Writes are synchronous: when `write` returns `Ok`, the value must be
/// readable by a fresh instance opened on the same backing store.
pub trait HistoryStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Replaces the value stored under `key`.
    fn write(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error>;
}

/// Process-local storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one entry.
    pub fn with_entry(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.into());
        Self { entries, writes: 0 }
    }

    /// Number of successful writes so far.
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl HistoryStorage for MemoryStorage {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_vec());
        self.writes += 1;
        Ok(())
    }
}
