//! Core data models.
//!
//! Defines the entities a rename run works with: [`Track`] (canonical
//! listing from MusicBrainz), [`ReleaseCandidate`] (one edition inside a
//! release group) and [`ReleaseGroupSummary`] (search hit for `find`).
//!
//! All of these are built once from a web service response and never
//! mutated afterwards.

use std::cmp::Ordering;

/// Artist name used when a track has no artist credit.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// One track of a release, as listed by MusicBrainz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Medium (disc) position, 1-based; 0 when the service omits it
    pub disc: u32,
    /// Position on the medium, 1-based; 0 when the service omits it
    pub position: u32,
    /// Canonical track title
    pub title: String,
    /// Credited artist string
    pub artist: String,
}

impl Track {
    pub fn new(disc: u32, position: u32, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            disc,
            position,
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Listing order: disc first, then position.
    pub fn listing_order(&self, other: &Self) -> Ordering {
        (self.disc, self.position).cmp(&(other.disc, other.position))
    }
}

/// A release's title and its tracks in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTracks {
    pub release_id: String,
    pub title: String,
    pub tracks: Vec<Track>,
}

impl ReleaseTracks {
    /// Build a listing, sorting tracks by (disc, position).
    ///
    /// The sort is stable, so tracks sharing a position keep response order.
    pub fn new(release_id: impl Into<String>, title: impl Into<String>, mut tracks: Vec<Track>) -> Self {
        tracks.sort_by(Track::listing_order);
        Self {
            release_id: release_id.into(),
            title: title.into(),
            tracks,
        }
    }
}

/// A concrete release inside a release group, as returned by a release search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub id: String,
    pub title: String,
    /// Official, Promotion, Bootleg, ...
    pub status: Option<String>,
    /// ISO country code
    pub country: Option<String>,
    /// YYYY, YYYY-MM or YYYY-MM-DD
    pub date: Option<String>,
    pub track_count: Option<u32>,
    pub disambiguation: Option<String>,
}

/// A release group found by an artist/album search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseGroupSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Album, Single, EP, ...
    pub primary_type: Option<String>,
    pub first_release_date: Option<String>,
}
