//! CLI subcommand implementations.

pub mod breaks;
pub mod history;
pub mod stats;
pub mod status;
pub mod util;
