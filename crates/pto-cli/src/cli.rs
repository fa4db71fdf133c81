//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::breaks::BreakArgs;
use crate::commands::history::HistoryArgs;

/// Paid time off: get paid to take a break.
///
/// Times a break, shows what your employer is paying for it as it runs, and
/// keeps a diary of every break you log.
#[derive(Debug, Parser)]
#[command(name = "pto", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Time a break live. Press Enter to log it, or type `c` to cancel.
    Break(BreakArgs),

    /// List logged breaks, newest first.
    History(HistoryArgs),

    /// Show totals across all logged breaks.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show configuration and storage status.
    Status,
}
