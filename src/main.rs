//! mb-track-rename - rename album files to match MusicBrainz.
//!
//! Fetches the authoritative track listing of a release, matches the files
//! of a local album directory to it by fuzzy title comparison, and renames
//! them to `NN Title.ext`.

pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod musicbrainz;
pub mod organizer;
pub mod release;
pub mod scanner;
pub mod service;
#[cfg(test)]
pub mod test_utils;
pub mod throttle;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr; stdout carries the rename report
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("mb_track_rename=info".parse()?))
        .init();

    cli::run_command(&args)
}
