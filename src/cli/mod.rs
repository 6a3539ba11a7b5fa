//! Command-line interface for mb-track-rename.
//!
//! `rename` does the actual work; `find` helps locate the MBIDs it needs;
//! `config` shows where settings come from.

mod commands;

pub use commands::{Cli, Commands, run_command};
