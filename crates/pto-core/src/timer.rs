//! Live elapsed-time and earnings tracking for the in-flight break.
//!
//! The engine is purely computational: it never schedules anything itself.
//! A cadence driver owned by the caller calls [`TimerEngine::tick`] every
//! [`TICK_INTERVAL`] while a break runs, and stops calling it once
//! [`TimerEngine::stop`] or [`TimerEngine::cancel`] returns.
//!
//! Every sample is measured as a wall-clock delta from the original start
//! instant, so late or skipped ticks never accumulate drift.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::{Clock, SystemClock, seconds_between};
use crate::error::BreakError;
use crate::session::Session;
use crate::types::HourlyWage;

/// Reference redraw cadence for live displays.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Break length that fills the progress ring (30 minutes).
pub const PROGRESS_REFERENCE_SECS: f64 = 1800.0;

/// Earnings for `elapsed_seconds` at `hourly_wage`.
pub fn earnings(elapsed_seconds: f64, hourly_wage: f64) -> f64 {
    elapsed_seconds * hourly_wage / SECONDS_PER_HOUR
}

/// Elapsed time and earnings at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElapsedSnapshot {
    /// Seconds since the break started.
    pub elapsed: f64,
    pub earnings: f64,
}

impl ElapsedSnapshot {
    pub const ZERO: Self = Self {
        elapsed: 0.0,
        earnings: 0.0,
    };

    /// Fraction of the reference break completed, capped at 1.0.
    pub fn progress(&self) -> f64 {
        (self.elapsed / PROGRESS_REFERENCE_SECS).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum TimerState {
    Idle,
    Running {
        started_at: DateTime<Utc>,
        hourly_wage: HourlyWage,
    },
}

/// Drives one break's elapsed time and live earnings.
#[derive(Debug)]
pub struct TimerEngine<C = SystemClock> {
    clock: C,
    state: TimerState,
    latest: ElapsedSnapshot,
}

impl TimerEngine<SystemClock> {
    pub const fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TimerEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerEngine<C> {
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            latest: ElapsedSnapshot::ZERO,
        }
    }

    /// Starts timing from now at `wage` per hour.
    ///
    /// Restarting a running engine discards the previous run.
    pub fn start(&mut self, wage: f64) -> Result<(), BreakError> {
        let hourly_wage = HourlyWage::new(wage)?;
        let started_at = self.clock.now();
        self.begin(started_at, hourly_wage);
        Ok(())
    }

    /// Starts timing an open session from its recorded start instant.
    ///
    /// Keeps the live display in step with the duration the session will
    /// have when committed.
    pub fn track(&mut self, session: &Session) -> Result<(), BreakError> {
        if session.is_committed() {
            return Err(BreakError::InvalidState {
                reason: "cannot track a session that has already ended",
            });
        }
        self.begin(session.start_time, session.hourly_wage);
        Ok(())
    }

    fn begin(&mut self, started_at: DateTime<Utc>, hourly_wage: HourlyWage) {
        if matches!(self.state, TimerState::Running { .. }) {
            tracing::debug!("restarting running timer");
        }
        self.state = TimerState::Running {
            started_at,
            hourly_wage,
        };
        self.latest = ElapsedSnapshot::ZERO;
        tracing::debug!(%started_at, wage = hourly_wage.value(), "timer started");
    }

    /// Recomputes elapsed time and earnings.
    ///
    /// Returns `None` when idle.
    pub fn tick(&mut self) -> Option<ElapsedSnapshot> {
        let TimerState::Running {
            started_at,
            hourly_wage,
        } = self.state
        else {
            return None;
        };
        self.latest = self.sample(started_at, hourly_wage);
        Some(self.latest)
    }

    /// Halts the timer and returns the final reading.
    ///
    /// Returns [`ElapsedSnapshot::ZERO`] if the timer was not running.
    pub fn stop(&mut self) -> ElapsedSnapshot {
        let snapshot = self.halt();
        tracing::debug!(elapsed = snapshot.elapsed, "timer stopped");
        snapshot
    }

    /// Halts the timer without a commit to follow.
    ///
    /// The returned reading is informational only.
    pub fn cancel(&mut self) -> ElapsedSnapshot {
        let snapshot = self.halt();
        tracing::debug!(elapsed = snapshot.elapsed, "timer cancelled");
        snapshot
    }

    fn halt(&mut self) -> ElapsedSnapshot {
        let snapshot = match self.state {
            TimerState::Idle => ElapsedSnapshot::ZERO,
            TimerState::Running {
                started_at,
                hourly_wage,
            } => self.sample(started_at, hourly_wage),
        };
        self.state = TimerState::Idle;
        self.latest = ElapsedSnapshot::ZERO;
        snapshot
    }

    /// A reading that never goes backwards, even if the wall clock does.
    fn sample(&self, started_at: DateTime<Utc>, hourly_wage: HourlyWage) -> ElapsedSnapshot {
        let elapsed = seconds_between(started_at, self.clock.now())
            .max(0.0)
            .max(self.latest.elapsed);
        ElapsedSnapshot {
            elapsed,
            earnings: earnings(elapsed, hourly_wage.value()),
        }
    }

    /// The most recent reading; zero when idle.
    pub const fn snapshot(&self) -> ElapsedSnapshot {
        self.latest
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration as ChronoDuration, TimeZone};

    use crate::clock::ManualClock;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap())
    }

    #[test]
    fn earnings_is_linear_in_time_and_wage() {
        let cases = [(0.0, 25.0), (1.0, 3600.0), (90.0, 30.0), (3600.0, 17.5)];
        for (seconds, wage) in cases {
            let expected = seconds * wage / 3600.0;
            assert!((earnings(seconds, wage) - expected).abs() < 1e-12);
        }
        assert!((earnings(90.0, 30.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn start_rejects_non_positive_wage() {
        let mut engine = TimerEngine::with_clock(clock());
        assert!(matches!(
            engine.start(0.0),
            Err(BreakError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.start(-10.0),
            Err(BreakError::InvalidArgument(_))
        ));
        assert!(!engine.is_running());
    }

    #[test]
    fn immediate_stop_earns_nothing() {
        let mut engine = TimerEngine::with_clock(clock());
        engine.start(25.0).unwrap();
        let snapshot = engine.stop();
        assert!(snapshot.elapsed.abs() < 1e-9);
        assert!(snapshot.earnings.abs() < 1e-9);
    }

    #[test]
    fn tick_measures_from_start_instant() {
        let clock = clock();
        let mut engine = TimerEngine::with_clock(clock.clone());
        engine.start(36.0).unwrap();

        clock.advance(ChronoDuration::milliseconds(100));
        engine.tick().unwrap();
        // A late tick still reports the true elapsed time.
        clock.advance(ChronoDuration::milliseconds(9_900));
        let snapshot = engine.tick().unwrap();

        assert!((snapshot.elapsed - 10.0).abs() < 1e-9);
        assert!((snapshot.earnings - 0.1).abs() < 1e-9);
        assert_eq!(engine.snapshot(), snapshot);
    }

    #[test]
    fn elapsed_never_decreases_when_clock_steps_back() {
        let clock = clock();
        let mut engine = TimerEngine::with_clock(clock.clone());
        engine.start(25.0).unwrap();

        clock.advance(ChronoDuration::seconds(20));
        engine.tick().unwrap();
        clock.advance(ChronoDuration::seconds(-15));
        let snapshot = engine.tick().unwrap();
        assert!((snapshot.elapsed - 20.0).abs() < 1e-9);
    }

    #[test]
    fn stop_is_idempotent() {
        let clock = clock();
        let mut engine = TimerEngine::with_clock(clock.clone());
        engine.start(25.0).unwrap();
        clock.advance(ChronoDuration::seconds(60));

        let first = engine.stop();
        assert!((first.elapsed - 60.0).abs() < 1e-9);

        let second = engine.stop();
        assert_eq!(second, ElapsedSnapshot::ZERO);
        assert!(engine.tick().is_none());
        assert_eq!(engine.snapshot(), ElapsedSnapshot::ZERO);
    }

    #[test]
    fn cancel_returns_engine_to_idle() {
        let clock = clock();
        let mut engine = TimerEngine::with_clock(clock.clone());
        engine.start(25.0).unwrap();
        clock.advance(ChronoDuration::seconds(5));

        let snapshot = engine.cancel();
        assert!((snapshot.elapsed - 5.0).abs() < 1e-9);
        assert!(!engine.is_running());
        assert_eq!(engine.cancel(), ElapsedSnapshot::ZERO);
    }

    #[test]
    fn restart_resets_elapsed() {
        let clock = clock();
        let mut engine = TimerEngine::with_clock(clock.clone());
        engine.start(25.0).unwrap();
        clock.advance(ChronoDuration::seconds(30));
        engine.tick().unwrap();

        engine.start(25.0).unwrap();
        assert_eq!(engine.snapshot(), ElapsedSnapshot::ZERO);
        clock.advance(ChronoDuration::seconds(2));
        assert!((engine.tick().unwrap().elapsed - 2.0).abs() < 1e-9);
    }

    #[test]
    fn track_uses_session_start_and_wage() {
        let clock = clock();
        let session = Session::open(clock.now(), HourlyWage::new(72.0).unwrap());
        clock.advance(ChronoDuration::seconds(50));

        let mut engine = TimerEngine::with_clock(clock.clone());
        engine.track(&session).unwrap();
        let snapshot = engine.tick().unwrap();
        assert!((snapshot.elapsed - 50.0).abs() < 1e-9);
        assert!((snapshot.earnings - 1.0).abs() < 1e-9);
    }

    #[test]
    fn track_rejects_committed_session() {
        let clock = clock();
        let mut session = Session::open(clock.now(), HourlyWage::new(25.0).unwrap());
        session.commit(
            clock.now(),
            crate::BreakCategory::Ghost,
            crate::Mood::Zen,
            String::new(),
        );
        let mut engine = TimerEngine::with_clock(clock);
        assert!(matches!(
            engine.track(&session),
            Err(BreakError::InvalidState { .. })
        ));
    }

    #[test]
    fn progress_caps_at_reference_break() {
        let half = ElapsedSnapshot {
            elapsed: 900.0,
            earnings: 0.0,
        };
        assert!((half.progress() - 0.5).abs() < 1e-12);
        let over = ElapsedSnapshot {
            elapsed: 5_000.0,
            earnings: 0.0,
        };
        assert!((over.progress() - 1.0).abs() < 1e-12);
    }
}
