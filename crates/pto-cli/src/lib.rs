//! Break timer CLI library.
//!
//! This crate provides the terminal interface over `pto-core`: the live
//! break timer, the diary, and summary statistics.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
