//! Release-group search command.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::musicbrainz::MusicBrainzClient;
use crate::service::{FoundReleaseGroup, RenameService};
use crate::throttle::TokioSleeper;

use super::preferred_country;

/// Search release groups and print their MBIDs
pub fn cmd_find(
    rt: &Runtime,
    config: &Config,
    artist: &str,
    album: &str,
    limit: u32,
    country: Option<&str>,
) -> anyhow::Result<()> {
    let artist = artist.trim();
    let album = album.trim();
    if artist.is_empty() || album.is_empty() {
        anyhow::bail!("usage: mb-track-rename find --artist <name> --album <title>");
    }

    let client = MusicBrainzClient::new(&config.musicbrainz)?;
    let service = RenameService::new(client, TokioSleeper, config.musicbrainz.request_delay());

    let found = rt.block_on(service.find_release_groups(artist, album, limit, preferred_country(config, country)))?;

    for (idx, row) in found.iter().enumerate() {
        print_row(idx + 1, row);
    }
    Ok(())
}

fn print_row(number: usize, row: &FoundReleaseGroup) {
    let group = &row.group;
    println!("{:02}) {} - {}", number, group.artist, group.title);
    println!(
        "    type: {}  first: {}",
        group.primary_type.as_deref().unwrap_or(""),
        group.first_release_date.as_deref().unwrap_or("")
    );
    println!("    rgid: {}", group.id);
    match &row.release_id {
        Some(mbid) => println!("    mbid: {}", mbid),
        None => println!("    mbid: (not found)"),
    }
}
