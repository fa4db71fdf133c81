//! Core domain logic for the break timer.
//!
//! This crate contains:
//! - Timer: live elapsed time and earnings for the running break
//! - Session store: the open session slot and the persisted history
//! - Statistics: totals and averages over the history

mod classification;
pub mod clock;
mod error;
pub mod session;
mod statistics;
pub mod storage;
mod store;
pub mod timer;
mod types;

pub use classification::{BreakCategory, Mood};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BreakError, PersistenceError};
pub use session::Session;
pub use statistics::Statistics;
pub use storage::{HISTORY_KEY, HistoryStorage, MemoryStorage};
pub use store::SessionStore;
pub use timer::{ElapsedSnapshot, TICK_INTERVAL, TimerEngine, earnings};
pub use types::{HourlyWage, SessionId, ValidationError};
