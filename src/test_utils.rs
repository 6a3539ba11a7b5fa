//! Test utilities and fixtures.
//!
//! Provides a canned [`MusicBrainzApi`], a [`Sleeper`] that records instead
//! of waiting, and small builders for domain values.
//!
//! # Example
//!
//! ```ignore
//! let api = MockMusicBrainz::default().with_release(mock_release("rel", &["Intro", "Outro"]));
//! let sleeper = RecordingSleeper::default();
//! let service = RenameService::new(api, sleeper.clone(), Duration::from_secs(1));
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::model::{ReleaseCandidate, ReleaseGroupSummary, ReleaseTracks, Track};
use crate::musicbrainz::{MusicBrainzApi, MusicBrainzError};
use crate::throttle::Sleeper;

/// In-memory MusicBrainz with a call log.
///
/// Unknown IDs answer [`MusicBrainzError::NotFound`], like the real service.
#[derive(Default)]
pub struct MockMusicBrainz {
    releases: HashMap<String, ReleaseTracks>,
    groups: HashMap<String, Vec<ReleaseCandidate>>,
    search_results: Vec<ReleaseGroupSummary>,
    calls: Mutex<Vec<String>>,
}

impl MockMusicBrainz {
    pub fn with_release(mut self, release: ReleaseTracks) -> Self {
        self.releases.insert(release.release_id.clone(), release);
        self
    }

    pub fn with_group(mut self, release_group_id: &str, releases: Vec<ReleaseCandidate>) -> Self {
        self.groups.insert(release_group_id.to_string(), releases);
        self
    }

    pub fn with_search_results(mut self, groups: Vec<ReleaseGroupSummary>) -> Self {
        self.search_results = groups;
        self
    }

    /// Calls made so far, e.g. `"lookup_release:rel"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl MusicBrainzApi for MockMusicBrainz {
    async fn lookup_release(&self, release_id: &str) -> Result<ReleaseTracks, MusicBrainzError> {
        self.record(format!("lookup_release:{}", release_id));
        self.releases
            .get(release_id)
            .cloned()
            .ok_or_else(|| MusicBrainzError::NotFound(release_id.to_string()))
    }

    async fn releases_in_group(&self, release_group_id: &str) -> Result<Vec<ReleaseCandidate>, MusicBrainzError> {
        self.record(format!("releases_in_group:{}", release_group_id));
        Ok(self.groups.get(release_group_id).cloned().unwrap_or_default())
    }

    async fn search_release_groups(
        &self,
        artist: &str,
        album: &str,
        limit: u32,
    ) -> Result<Vec<ReleaseGroupSummary>, MusicBrainzError> {
        self.record(format!("search_release_groups:{}:{}", artist, album));
        Ok(self.search_results.iter().take(limit as usize).cloned().collect())
    }
}

/// Sleeper that only remembers what it was asked to wait.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    waits: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
    }
}

/// A single-disc release whose tracks are credited to "Test Artist".
pub fn mock_release(release_id: &str, titles: &[&str]) -> ReleaseTracks {
    let tracks = titles
        .iter()
        .enumerate()
        .map(|(i, title)| Track::new(1, i as u32 + 1, *title, "Test Artist"))
        .collect();
    ReleaseTracks::new(release_id, "Test Album", tracks)
}

/// A release candidate with the given status and track count.
pub fn mock_candidate(id: &str, status: &str, track_count: u32) -> ReleaseCandidate {
    ReleaseCandidate {
        id: id.to_string(),
        title: "Test Album".to_string(),
        status: Some(status.to_string()),
        track_count: Some(track_count),
        ..Default::default()
    }
}

/// Create empty files named `names` inside `dir`.
pub fn touch_all(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), name.as_bytes()).expect("Failed to create test file");
    }
}
