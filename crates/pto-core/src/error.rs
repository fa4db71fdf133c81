//! Errors surfaced by the timer engine and session store.

use thiserror::Error;

use crate::types::ValidationError;

/// Errors from timer and session operations.
#[derive(Debug, Error)]
pub enum BreakError {
    /// A caller passed a value the core cannot accept (e.g. a zero wage).
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The operation is not allowed in the current session state.
    #[error("invalid state: {reason}")]
    InvalidState { reason: &'static str },

    /// The commit happened in memory but could not be written to storage.
    #[error("failed to persist session history: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Why a history write-through failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Serializing the history failed.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend rejected the write.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
