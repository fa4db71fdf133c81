//! The break session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classification::{BreakCategory, Mood};
use crate::clock::seconds_between;
use crate::timer::earnings;
use crate::types::{HourlyWage, SessionId};

/// One timed break.
///
/// A session is either *open* (no end time, no classification) or
/// *committed* (end time, category, and mood all present).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique identifier (UUID).
    pub id: SessionId,

    /// When the break started.
    pub start_time: DateTime<Utc>,

    /// When the break ended. Absent while running.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    /// Wage snapshot taken at start.
    pub hourly_wage: HourlyWage,

    #[serde(default)]
    pub category: Option<BreakCategory>,

    #[serde(default)]
    pub mood: Option<Mood>,

    #[serde(default)]
    pub notes: String,
}

/// Ways a session can violate its open/committed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionShapeError {
    EndsBeforeStart,
    PartiallyCommitted,
}

impl Session {
    /// Creates an open session starting at `start_time`.
    pub fn open(start_time: DateTime<Utc>, hourly_wage: HourlyWage) -> Self {
        Self {
            id: SessionId::generate(),
            start_time,
            end_time: None,
            hourly_wage,
            category: None,
            mood: None,
            notes: String::new(),
        }
    }

    /// Whether the session has been finalized.
    pub const fn is_committed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Elapsed seconds, measured to `now` while open and frozen once ended.
    ///
    /// Never negative.
    pub fn duration_at(&self, now: DateTime<Utc>) -> f64 {
        let end = self.end_time.unwrap_or(now);
        seconds_between(self.start_time, end).max(0.0)
    }

    /// Elapsed seconds against the system clock.
    pub fn duration(&self) -> f64 {
        self.duration_at(Utc::now())
    }

    pub fn earnings_at(&self, now: DateTime<Utc>) -> f64 {
        earnings(self.duration_at(now), self.hourly_wage.value())
    }

    pub fn earnings(&self) -> f64 {
        self.earnings_at(Utc::now())
    }

    /// Finalizes the session with its end time and classification.
    ///
    /// An end time earlier than the start (wall clock stepped back) is
    /// clamped to the start.
    pub(crate) fn commit(
        &mut self,
        end_time: DateTime<Utc>,
        category: BreakCategory,
        mood: Mood,
        notes: String,
    ) {
        self.end_time = Some(end_time.max(self.start_time));
        self.category = Some(category);
        self.mood = Some(mood);
        self.notes = notes;
    }

    /// Checks the open/committed invariants.
    pub fn check_shape(&self) -> Result<(), SessionShapeError> {
        match (self.end_time, self.category, self.mood) {
            (Some(end), Some(_), Some(_)) if end < self.start_time => {
                Err(SessionShapeError::EndsBeforeStart)
            }
            (Some(_), Some(_), Some(_)) => Ok(()),
            (None, None, None) if self.notes.is_empty() => Ok(()),
            _ => Err(SessionShapeError::PartiallyCommitted),
        }
    }
}
