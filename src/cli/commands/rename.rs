//! Album rename command.

use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::matcher::MatchOutcome;
use crate::musicbrainz::MusicBrainzClient;
use crate::organizer::{NamingOptions, RenameOutcome};
use crate::service::{ReleaseSelector, RenameRequest, RenameRun, RenameService};
use crate::throttle::TokioSleeper;

use super::preferred_country;

/// Parsed `rename` arguments
pub struct RenameArgs {
    pub mbid: Option<String>,
    pub rgid: Option<String>,
    pub dir: PathBuf,
    pub artist_in_filename: bool,
    pub country: Option<String>,
    pub track_count: Option<u32>,
    pub dry_run: bool,
}

/// Rename the files in one album directory
pub fn cmd_rename(rt: &Runtime, config: &Config, args: RenameArgs) -> anyhow::Result<()> {
    let selector = match (args.mbid, args.rgid) {
        (Some(mbid), _) => ReleaseSelector::Release(mbid),
        (None, Some(rgid)) => ReleaseSelector::ReleaseGroup(rgid),
        (None, None) => anyhow::bail!("either --mbid or --rgid is required"),
    };

    let request = RenameRequest {
        selector,
        dir: args.dir,
        naming: NamingOptions {
            artist_in_filename: args.artist_in_filename || config.naming.artist_in_filename,
        },
        preferred_country: preferred_country(config, args.country.as_deref()),
        expected_track_count: args.track_count,
        dry_run: args.dry_run,
    };

    let client = MusicBrainzClient::new(&config.musicbrainz)?;
    let service = RenameService::new(client, TokioSleeper, config.musicbrainz.request_delay());

    if request.dry_run {
        println!("[DRY RUN MODE - No files will be renamed]\n");
    }

    let run = rt.block_on(service.rename_album(&request))?;
    print_run(&run);
    Ok(())
}

fn print_run(run: &RenameRun) {
    println!(
        "Using release {}: {} ({} tracks, {} files)",
        run.release.release_id,
        run.release.title,
        run.release.tracks.len(),
        run.files.len()
    );

    for line in warning_lines(&run.matches) {
        println!("{}", line);
    }

    for result in &run.report.results {
        let plan = &result.plan;
        match &result.outcome {
            RenameOutcome::Unchanged => {}
            RenameOutcome::Planned => {
                println!("{:02}:  WOULD RENAME {:?} -> {:?}", plan.track_number, plan.source, plan.target)
            }
            RenameOutcome::Renamed => println!("{:02}:  {:?} -> {:?}", plan.track_number, plan.source, plan.target),
            RenameOutcome::Failed(reason) => {
                eprintln!("{:02}:  Error renaming {:?}: {}", plan.track_number, plan.source, reason)
            }
        }
    }

    println!(
        "\nCompleted: {} renamed, {} already named, {} failed, {} tracks unmatched",
        run.report.renamed(),
        run.report.unchanged(),
        run.report.failed(),
        run.matches.unmatched_count()
    );
}

/// One line per matcher warning, in the order they were raised
fn warning_lines(matches: &MatchOutcome) -> Vec<String> {
    matches.warnings.iter().map(|w| format!("warning: {}", w)).collect()
}
