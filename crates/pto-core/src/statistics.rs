//! Aggregates over the committed history.

use serde::Serialize;

use crate::session::Session;

/// Summary numbers for the diary view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    /// Sum of every session's earnings.
    pub total_earnings: f64,
    pub session_count: usize,
    /// Mean duration in seconds; 0 when there are no sessions.
    pub average_duration: f64,
}

impl Statistics {
    #[expect(
        clippy::cast_precision_loss,
        reason = "session counts are far below 2^52"
    )]
    pub fn from_sessions(sessions: &[Session]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }
        let (total_earnings, total_duration) = sessions.iter().fold(
            (0.0, 0.0),
            |(earned, seconds), session| {
                (earned + session.earnings(), seconds + session.duration())
            },
        );
        Self {
            total_earnings,
            session_count: sessions.len(),
            average_duration: total_duration / sessions.len() as f64,
        }
    }
}
