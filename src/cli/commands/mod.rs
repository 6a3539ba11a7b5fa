//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed arguments
//! and returns an `anyhow::Result<()>`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};

use crate::config::{self, Config};
use crate::musicbrainz;

mod config_cmd;
mod find;
mod rename;

use config_cmd::cmd_config;
use find::cmd_find;
use rename::{RenameArgs, cmd_rename};

/// Rename album files to match a MusicBrainz track listing
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the OS default location
    #[arg(long, global = true, env = "MB_TRACK_RENAME_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Rename the files of one album directory
    Rename {
        /// MusicBrainz RELEASE MBID (best option)
        #[arg(long, value_parser = mbid_arg, required_unless_present = "rgid", conflicts_with = "rgid")]
        mbid: Option<String>,
        /// MusicBrainz RELEASE-GROUP MBID (a release will be picked)
        #[arg(long, value_parser = mbid_arg)]
        rgid: Option<String>,
        /// Directory containing the audio files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Include the artist name in output filenames
        #[arg(long)]
        artist_in_filename: bool,
        /// Preferred release country when picking from a release group
        #[arg(long)]
        country: Option<String>,
        /// Expected track count when picking from a release group (default: number of files)
        #[arg(long)]
        track_count: Option<u32>,
        /// Dry run - show what would be renamed without touching files
        #[arg(long)]
        dry_run: bool,
    },
    /// Search release groups by artist and album and print their MBIDs
    Find {
        /// Artist name
        #[arg(long)]
        artist: String,
        /// Album title
        #[arg(long)]
        album: String,
        /// Number of release groups to list
        #[arg(long, default_value = "10")]
        limit: u32,
        /// Preferred release country
        #[arg(long)]
        country: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the parsed CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    config.validate()?;

    match &cli.command {
        Commands::Rename {
            mbid,
            rgid,
            dir,
            artist_in_filename,
            country,
            track_count,
            dry_run,
        } => {
            let args = RenameArgs {
                mbid: mbid.clone(),
                rgid: rgid.clone(),
                dir: dir.clone(),
                artist_in_filename: *artist_in_filename,
                country: country.clone(),
                track_count: *track_count,
                dry_run: *dry_run,
            };
            cmd_rename(&runtime()?, &config, args)
        }
        Commands::Find {
            artist,
            album,
            limit,
            country,
        } => cmd_find(&runtime()?, &config, artist, album, *limit, country.as_deref()),
        Commands::Config { init } => cmd_config(&config, cli.config.as_ref(), *init),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Requests are awaited one after another, so one thread is enough
fn runtime() -> anyhow::Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// clap value parser for MBID arguments
fn mbid_arg(s: &str) -> Result<String, String> {
    musicbrainz::parse_mbid(s).map_err(|e| e.to_string())
}

/// Preferred country: command line first, then config
fn preferred_country(config: &Config, flag: Option<&str>) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| Some(config.release.preferred_country.clone()))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
