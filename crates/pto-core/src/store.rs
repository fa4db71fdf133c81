//! The open-session slot and the persisted history of committed breaks.
//!
//! # State
//!
//! ```text
//! Idle --start_session--> Open --commit_session--> Idle
//!                          |
//!                          +----cancel_session---> Idle
//! ```
//!
//! The open session lives only in memory. History is loaded once when the
//! store is built and rewritten in full after every commit.
//!
//! # Persistence failures
//!
//! A failed write is reported as [`BreakError::Persistence`] but the commit
//! is not rolled back: history stays correct in memory and the next commit
//! retries the whole write.

use thiserror::Error;

use crate::classification::{BreakCategory, Mood};
use crate::clock::{Clock, SystemClock};
use crate::error::{BreakError, PersistenceError};
use crate::session::{Session, SessionShapeError};
use crate::statistics::Statistics;
use crate::storage::{HISTORY_KEY, HistoryStorage};
use crate::types::{HourlyWage, SessionId};

/// Why a persisted history blob was discarded at load.
#[derive(Debug, Error)]
enum DecodeError {
    #[error("malformed history: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session {id} is malformed: {shape:?}")]
    Shape { id: SessionId, shape: SessionShapeError },
}

/// Owns the single open session and the committed history.
///
/// Not thread-safe; keep one owner and serialize access to it.
#[derive(Debug)]
pub struct SessionStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    history: Vec<Session>,
    active: Option<Session>,
}

impl<S: HistoryStorage> SessionStore<S, SystemClock> {
    /// Builds a store over `storage`, loading any persisted history.
    pub fn load(storage: S) -> Self {
        Self::load_with_clock(storage, SystemClock)
    }
}

impl<S: HistoryStorage, C: Clock> SessionStore<S, C> {
    /// Builds a store with an explicit clock.
    ///
    /// Missing, unreadable, or corrupt history starts the store empty.
    pub fn load_with_clock(storage: S, clock: C) -> Self {
        let history = match storage.read(HISTORY_KEY) {
            Ok(Some(bytes)) => decode_history(&bytes).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding unreadable session history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read session history");
                Vec::new()
            }
        };
        tracing::debug!(sessions = history.len(), "loaded session history");
        Self {
            storage,
            clock,
            history,
            active: None,
        }
    }

    /// Opens a new session with the given wage snapshot.
    pub fn start_session(&mut self, wage: f64) -> Result<SessionId, BreakError> {
        if self.active.is_some() {
            return Err(BreakError::InvalidState {
                reason: "a session is already open",
            });
        }
        let hourly_wage = HourlyWage::new(wage)?;
        let session = Session::open(self.clock.now(), hourly_wage);
        let id = session.id.clone();
        tracing::debug!(session_id = %id, wage, "session started");
        self.active = Some(session);
        Ok(id)
    }

    /// Ends the open session, classifies it, and moves it to the front of
    /// history.
    ///
    /// On `Err(BreakError::Persistence(_))` the session is still committed
    /// in memory.
    pub fn commit_session(
        &mut self,
        category: BreakCategory,
        mood: Mood,
        notes: impl Into<String>,
    ) -> Result<(), BreakError> {
        let Some(mut session) = self.active.take() else {
            return Err(BreakError::InvalidState {
                reason: "no session is open",
            });
        };
        session.commit(self.clock.now(), category, mood, notes.into());
        tracing::debug!(
            session_id = %session.id,
            duration = session.duration(),
            "session committed"
        );
        self.history.insert(0, session);

        self.persist().map_err(|err| {
            tracing::warn!(error = %err, "session history not persisted");
            BreakError::from(err)
        })
    }

    /// Discards the open session. Returns whether one was open.
    pub fn cancel_session(&mut self) -> bool {
        match self.active.take() {
            Some(session) => {
                tracing::debug!(session_id = %session.id, "session cancelled");
                true
            }
            None => false,
        }
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(&self.history)?;
        self.storage
            .write(HISTORY_KEY, &bytes)
            .map_err(|err| PersistenceError::Storage(Box::new(err)))
    }

    /// Committed sessions, newest first.
    pub fn history(&self) -> &[Session] {
        &self.history
    }

    pub const fn active_session(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_sessions(&self.history)
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Gives back the storage, dropping any open session.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn decode_history(bytes: &[u8]) -> Result<Vec<Session>, DecodeError> {
    let sessions: Vec<Session> = serde_json::from_slice(bytes)?;
    for session in &sessions {
        // Only committed sessions are ever written.
        if !session.is_committed() {
            return Err(DecodeError::Shape {
                id: session.id.clone(),
                shape: SessionShapeError::PartiallyCommitted,
            });
        }
        session.check_shape().map_err(|shape| DecodeError::Shape {
            id: session.id.clone(),
            shape,
        })?;
    }
    Ok(sessions)
}
