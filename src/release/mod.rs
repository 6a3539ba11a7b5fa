//! Release disambiguation and release-group ranking.
//!
//! Pure functions over [`crate::model`] types; no transport involved.
//! Ties always go to the candidate seen first, so results depend on the
//! response order MusicBrainz returns.

use std::cmp::Ordering;

use crate::model::{ReleaseCandidate, ReleaseGroupSummary};

pub const WEIGHT_OFFICIAL: u32 = 1000;
pub const WEIGHT_TRACK_COUNT: u32 = 200;
pub const WEIGHT_COUNTRY: u32 = 50;
pub const WEIGHT_DATED: u32 = 10;
pub const WEIGHT_PLAIN: u32 = 5;

/// What a "good" release looks like for this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseCriteria {
    /// Country code earning [`WEIGHT_COUNTRY`]
    pub preferred_country: Option<String>,
    /// Track count earning [`WEIGHT_TRACK_COUNT`]
    pub expected_track_count: Option<u32>,
    /// Give [`WEIGHT_PLAIN`] to releases without a disambiguation comment
    pub prefer_plain: bool,
}

/// Score one release. Higher is better.
pub fn score_release(release: &ReleaseCandidate, criteria: &ReleaseCriteria) -> u32 {
    let mut score = 0;

    if release.status.as_deref() == Some("Official") {
        score += WEIGHT_OFFICIAL;
    }
    if criteria.expected_track_count.is_some() && release.track_count == criteria.expected_track_count {
        score += WEIGHT_TRACK_COUNT;
    }
    if let (Some(country), Some(wanted)) = (release.country.as_deref(), criteria.preferred_country.as_deref())
        && country.eq_ignore_ascii_case(wanted)
    {
        score += WEIGHT_COUNTRY;
    }
    if release.date.as_deref().is_some_and(|d| !d.is_empty()) {
        score += WEIGHT_DATED;
    }
    if criteria.prefer_plain && release.disambiguation.as_deref().is_none_or(str::is_empty) {
        score += WEIGHT_PLAIN;
    }

    score
}

/// Pick the highest-scoring release; the first one wins a tie.
pub fn pick_best_release<'a>(
    releases: &'a [ReleaseCandidate],
    criteria: &ReleaseCriteria,
) -> Option<&'a ReleaseCandidate> {
    let mut best: Option<(&ReleaseCandidate, u32)> = None;
    for release in releases {
        let score = score_release(release, criteria);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((release, score));
        }
    }
    best.map(|(release, _)| release)
}

/// Ordering for the `find` table: Albums first, newest first, then by title.
pub fn compare_release_groups(a: &ReleaseGroupSummary, b: &ReleaseGroupSummary) -> Ordering {
    let is_album = |rg: &ReleaseGroupSummary| rg.primary_type.as_deref() == Some("Album");
    let date = |rg: &ReleaseGroupSummary| rg.first_release_date.clone().unwrap_or_default();

    is_album(b)
        .cmp(&is_album(a))
        .then_with(|| date(b).cmp(&date(a)))
        .then_with(|| a.title.cmp(&b.title))
}
