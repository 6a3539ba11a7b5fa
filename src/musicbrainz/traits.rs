//! Trait seam for the MusicBrainz web service.
//!
//! The rename and find flows are generic over [`MusicBrainzApi`], so tests
//! can substitute a canned implementation (see `test_utils::MockMusicBrainz`).

use async_trait::async_trait;

use super::{MusicBrainzClient, MusicBrainzError};
use crate::model::{ReleaseCandidate, ReleaseGroupSummary, ReleaseTracks};

/// Read-only MusicBrainz operations used by this tool.
#[async_trait]
pub trait MusicBrainzApi: Send + Sync {
    /// Look up a release's ordered track listing.
    async fn lookup_release(&self, release_id: &str) -> Result<ReleaseTracks, MusicBrainzError>;

    /// List the releases of a release group, in response order.
    async fn releases_in_group(&self, release_group_id: &str) -> Result<Vec<ReleaseCandidate>, MusicBrainzError>;

    /// Search release groups by artist and album title.
    async fn search_release_groups(
        &self,
        artist: &str,
        album: &str,
        limit: u32,
    ) -> Result<Vec<ReleaseGroupSummary>, MusicBrainzError>;
}

#[async_trait]
impl MusicBrainzApi for MusicBrainzClient {
    async fn lookup_release(&self, release_id: &str) -> Result<ReleaseTracks, MusicBrainzError> {
        MusicBrainzClient::lookup_release(self, release_id).await
    }

    async fn releases_in_group(&self, release_group_id: &str) -> Result<Vec<ReleaseCandidate>, MusicBrainzError> {
        MusicBrainzClient::releases_in_group(self, release_group_id).await
    }

    async fn search_release_groups(
        &self,
        artist: &str,
        album: &str,
        limit: u32,
    ) -> Result<Vec<ReleaseGroupSummary>, MusicBrainzError> {
        MusicBrainzClient::search_release_groups(self, artist, album, limit).await
    }
}
