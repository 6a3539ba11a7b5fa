//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use crate::model::{ReleaseCandidate, ReleaseGroupSummary, ReleaseTracks, Track, UNKNOWN_ARTIST};

/// Flatten a release lookup into tracks ordered by (disc, position).
pub fn to_release_tracks(response: dto::ReleaseResponse) -> ReleaseTracks {
    let mut tracks = Vec::new();

    for medium in response.media {
        let disc = medium.position.unwrap_or(0);
        for track in medium.tracks {
            let artist = primary_artist(&track.artist_credit).unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
            tracks.push(Track::new(
                disc,
                track.position.unwrap_or(0),
                track.title.unwrap_or_default(),
                artist,
            ));
        }
    }

    ReleaseTracks::new(response.id, response.title, tracks)
}

/// Convert release search hits, keeping response order.
pub fn to_release_candidates(response: dto::ReleaseSearchResponse) -> Vec<ReleaseCandidate> {
    response
        .releases
        .into_iter()
        .map(|r| ReleaseCandidate {
            id: r.id,
            title: r.title,
            status: r.status,
            country: r.country,
            date: r.date,
            track_count: r.track_count,
            disambiguation: r.disambiguation,
        })
        .collect()
}

/// Convert release-group search hits, keeping response order.
pub fn to_release_groups(response: dto::ReleaseGroupSearchResponse) -> Vec<ReleaseGroupSummary> {
    response
        .release_groups
        .into_iter()
        .map(|rg| ReleaseGroupSummary {
            artist: build_artist_string(&rg.artist_credit).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            id: rg.id,
            title: rg.title,
            primary_type: rg.primary_type,
            first_release_date: rg.first_release_date,
        })
        .collect()
}

/// Credited (or else official) name of one artist credit
fn credit_name(credit: &dto::ArtistCredit) -> &str {
    credit
        .name
        .as_deref()
        .or_else(|| credit.artist.as_ref().map(|a| a.name.as_str()))
        .unwrap_or_default()
}

/// Track artist: the first credit only, so collaborations name the lead artist
fn primary_artist(credits: &[dto::ArtistCredit]) -> Option<String> {
    credits
        .first()
        .map(|c| credit_name(c).trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Build a display artist string from credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    let mut result = String::new();
    for credit in credits {
        result.push_str(credit_name(credit));

        if let Some(ref join) = credit.joinphrase {
            result.push_str(join);
        }
    }

    let trimmed = result.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
