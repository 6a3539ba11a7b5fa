//! Rename service - orchestrates one run end to end
//!
//! 1. List candidate files in the target directory
//! 2. Resolve a release MBID (directly, or by picking one from a release group)
//! 3. Fetch the release's ordered track listing
//! 4. Match files to tracks, plan names, rename
//!
//! Also drives the `find` flow: search release groups and pick a
//! representative release for each.
//!
//! Remote calls are strictly sequential. Every fatal problem returns an
//! [`Error`]; per-track and per-file problems are carried in the result.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Error, Result, ResultExt};
use crate::matcher::{self, MatchOutcome};
use crate::model::{ReleaseGroupSummary, ReleaseTracks};
use crate::musicbrainz::MusicBrainzApi;
use crate::organizer::{self, NamingOptions, RenameReport};
use crate::release::{self, ReleaseCriteria};
use crate::scanner;
use crate::throttle::Sleeper;

/// How the user identified the album
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    /// A concrete release MBID
    Release(String),
    /// A release-group MBID; one of its releases gets picked
    ReleaseGroup(String),
}

/// Everything a rename run needs besides the collaborators
#[derive(Debug, Clone)]
pub struct RenameRequest {
    pub selector: ReleaseSelector,
    pub dir: PathBuf,
    pub naming: NamingOptions,
    pub preferred_country: Option<String>,
    /// Track count to favour when picking a release; defaults to the number of files
    pub expected_track_count: Option<u32>,
    pub dry_run: bool,
}

/// What a rename run saw and did
#[derive(Debug, Clone)]
pub struct RenameRun {
    pub release: ReleaseTracks,
    pub files: Vec<String>,
    pub matches: MatchOutcome,
    pub report: RenameReport,
}

/// A release group with the release picked for it, if any
#[derive(Debug, Clone)]
pub struct FoundReleaseGroup {
    pub group: ReleaseGroupSummary,
    pub release_id: Option<String>,
}

/// Service that ties MusicBrainz, matching and renaming together
pub struct RenameService<A, S> {
    api: A,
    sleeper: S,
    delay: Duration,
}

impl<A: MusicBrainzApi, S: Sleeper> RenameService<A, S> {
    /// `delay` is the fixed pause inserted between dependent requests
    pub fn new(api: A, sleeper: S, delay: Duration) -> Self {
        Self { api, sleeper, delay }
    }

    /// Run a full rename for one album directory
    pub async fn rename_album(&self, request: &RenameRequest) -> Result<RenameRun> {
        let files = scanner::list_candidate_files(&request.dir)?;
        info!(count = files.len(), dir = %request.dir.display(), "Found candidate files");

        let criteria = ReleaseCriteria {
            preferred_country: request.preferred_country.clone(),
            expected_track_count: request
                .expected_track_count
                .or_else(|| (!files.is_empty()).then_some(files.len() as u32)),
            prefer_plain: false,
        };

        let release_id = self.resolve_release_id(&request.selector, &criteria).await?;
        let release = self.fetch_tracks(&release_id).await?;
        info!(release = %release.release_id, title = %release.title, tracks = release.tracks.len(), "Using release");

        let matches = matcher::match_tracks(&release.tracks, &files);
        // Callers report warnings from the returned outcome
        for warning in &matches.warnings {
            debug!("{}", warning);
        }
        for (track, assignment) in release.tracks.iter().zip(&matches.assignments) {
            if let Some(assignment) = assignment {
                debug!(title = %track.title, file = %assignment.file, score = assignment.score, "Matched");
            }
        }

        let plans = organizer::plan_renames(&release.tracks, &matches.assignments, request.naming);
        let report = organizer::apply_renames(&request.dir, &plans, request.dry_run);

        Ok(RenameRun {
            release,
            files,
            matches,
            report,
        })
    }

    /// Turn a selector into a concrete release MBID
    ///
    /// A release-group lookup is followed by the fixed delay, since the
    /// track lookup comes right after it.
    pub async fn resolve_release_id(&self, selector: &ReleaseSelector, criteria: &ReleaseCriteria) -> Result<String> {
        match selector {
            ReleaseSelector::Release(id) => Ok(id.clone()),
            ReleaseSelector::ReleaseGroup(rgid) => {
                let picked = self.pick_release_in_group(rgid, criteria).await?;
                self.sleeper.sleep(self.delay).await;
                picked.ok_or_else(|| Error::NoReleases {
                    release_group_id: rgid.clone(),
                })
            }
        }
    }

    /// Search release groups and pick a release for each, ranked for display
    ///
    /// A group without releases is kept with `release_id: None`.
    pub async fn find_release_groups(
        &self,
        artist: &str,
        album: &str,
        limit: u32,
        preferred_country: Option<String>,
    ) -> Result<Vec<FoundReleaseGroup>> {
        let groups = self
            .api
            .search_release_groups(artist, album, limit)
            .await
            .with_context("release group search")?;

        if groups.is_empty() {
            return Err(Error::NoReleaseGroups {
                artist: artist.to_string(),
                album: album.to_string(),
            });
        }
        info!(count = groups.len(), "Found release groups");

        let criteria = ReleaseCriteria {
            preferred_country,
            expected_track_count: None,
            prefer_plain: true,
        };
        self.pick_for_groups(groups, &criteria).await
    }

    async fn pick_for_groups(
        &self,
        groups: Vec<ReleaseGroupSummary>,
        criteria: &ReleaseCriteria,
    ) -> Result<Vec<FoundReleaseGroup>> {
        let mut found = Vec::with_capacity(groups.len());
        for group in groups {
            // Every group costs one more request
            self.sleeper.sleep(self.delay).await;
            let release_id = self.pick_release_in_group(&group.id, criteria).await?;
            found.push(FoundReleaseGroup { group, release_id });
        }

        found.sort_by(|a, b| release::compare_release_groups(&a.group, &b.group));
        Ok(found)
    }

    /// Pick the best release of a group; `None` when the group has no releases
    async fn pick_release_in_group(&self, rgid: &str, criteria: &ReleaseCriteria) -> Result<Option<String>> {
        let releases = self
            .api
            .releases_in_group(rgid)
            .await
            .with_context(format!("release search for group {}", rgid))?;

        let picked = release::pick_best_release(&releases, criteria).map(|r| {
            info!(
                release = %r.id,
                title = %r.title,
                score = release::score_release(r, criteria),
                candidates = releases.len(),
                "Picked release from group {}",
                rgid
            );
            r.id.clone()
        });
        Ok(picked)
    }

    async fn fetch_tracks(&self, release_id: &str) -> Result<ReleaseTracks> {
        let release = self
            .api
            .lookup_release(release_id)
            .await
            .with_context(format!("release lookup for {}", release_id))?;

        if release.tracks.is_empty() {
            return Err(Error::NoTracks {
                release_id: release_id.to_string(),
            });
        }
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchWarning;
    use crate::model::ReleaseCandidate;
    use crate::organizer::RenameOutcome;
    use crate::test_utils::{MockMusicBrainz, RecordingSleeper, mock_candidate, mock_release, touch_all};
    use tempfile::tempdir;

    const DELAY: Duration = Duration::from_millis(1000);

    fn service(api: MockMusicBrainz) -> (RenameService<MockMusicBrainz, RecordingSleeper>, RecordingSleeper) {
        let sleeper = RecordingSleeper::default();
        (RenameService::new(api, sleeper.clone(), DELAY), sleeper)
    }

    fn request(selector: ReleaseSelector, dir: &std::path::Path) -> RenameRequest {
        RenameRequest {
            selector,
            dir: dir.to_path_buf(),
            naming: NamingOptions::default(),
            preferred_country: Some("US".to_string()),
            expected_track_count: None,
            dry_run: false,
        }
    }

    fn group(id: &str, kind: &str, date: &str) -> ReleaseGroupSummary {
        ReleaseGroupSummary {
            id: id.to_string(),
            title: format!("Title {}", id),
            artist: "Artist".to_string(),
            primary_type: Some(kind.to_string()),
            first_release_date: Some(date.to_string()),
        }
    }

    #[tokio::test]
    async fn test_rename_album_by_release_id() {
        let dir = tempdir().unwrap();
        touch_all(dir.path(), &["paranoid android.mp3", "airbag.mp3", "cover.jpg"]);

        let api = MockMusicBrainz::default().with_release(mock_release("rel", &["Airbag", "Paranoid Android"]));
        let (service, sleeper) = service(api);

        let run = service
            .rename_album(&request(ReleaseSelector::Release("rel".to_string()), dir.path()))
            .await
            .unwrap();

        assert_eq!(run.report.renamed(), 2);
        assert!(dir.path().join("01 Airbag.mp3").exists());
        assert!(dir.path().join("02 Paranoid Android.mp3").exists());
        assert!(dir.path().join("cover.jpg").exists());
        assert_eq!(
            run.matches.warnings,
            vec![MatchWarning::CountMismatch { tracks: 2, files: 3 }]
        );
        // A direct release id needs no search, hence no pause
        assert!(sleeper.waits().is_empty());
    }

    #[tokio::test]
    async fn test_rename_album_with_artist_and_dry_run() {
        let dir = tempdir().unwrap();
        touch_all(dir.path(), &["track 1 airbag.flac"]);

        let api = MockMusicBrainz::default().with_release(mock_release("rel", &["Airbag"]));
        let (service, _) = service(api);

        let mut req = request(ReleaseSelector::Release("rel".to_string()), dir.path());
        req.naming.artist_in_filename = true;
        req.dry_run = true;

        let run = service.rename_album(&req).await.unwrap();

        assert_eq!(run.report.results[0].plan.target, "01 Test Artist - Airbag.flac");
        assert_eq!(run.report.results[0].outcome, RenameOutcome::Planned);
        assert!(dir.path().join("track 1 airbag.flac").exists());
    }

    #[tokio::test]
    async fn test_release_group_picks_release_and_pauses() {
        let dir = tempdir().unwrap();
        touch_all(dir.path(), &["a.mp3", "b.mp3"]);

        let api = MockMusicBrainz::default()
            .with_group(
                "rg",
                vec![
                    mock_candidate("wrong-count", "Official", 3),
                    mock_candidate("right-count", "Official", 2),
                ],
            )
            .with_release(mock_release("right-count", &["A", "B"]));
        let (service, sleeper) = service(api);

        let run = service
            .rename_album(&request(ReleaseSelector::ReleaseGroup("rg".to_string()), dir.path()))
            .await
            .unwrap();

        assert_eq!(run.release.release_id, "right-count");
        assert_eq!(sleeper.waits(), vec![DELAY]);
        assert_eq!(
            service.api.calls(),
            vec!["releases_in_group:rg", "lookup_release:right-count"]
        );
    }

    #[tokio::test]
    async fn test_explicit_track_count_overrides_file_count() {
        let dir = tempdir().unwrap();
        touch_all(dir.path(), &["a.mp3", "b.mp3"]);

        let api = MockMusicBrainz::default()
            .with_group(
                "rg",
                vec![mock_candidate("two", "Official", 2), mock_candidate("three", "Official", 3)],
            )
            .with_release(mock_release("three", &["A", "B", "C"]));
        let (service, _) = service(api);

        let mut req = request(ReleaseSelector::ReleaseGroup("rg".to_string()), dir.path());
        req.expected_track_count = Some(3);

        let run = service.rename_album(&req).await.unwrap();
        assert_eq!(run.release.release_id, "three");
    }

    #[tokio::test]
    async fn test_empty_release_group_is_fatal() {
        let dir = tempdir().unwrap();
        let api = MockMusicBrainz::default().with_group("rg", vec![]);
        let (service, _) = service(api);

        let err = service
            .rename_album(&request(ReleaseSelector::ReleaseGroup("rg".to_string()), dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoReleases { .. }));
    }

    #[tokio::test]
    async fn test_release_without_tracks_is_fatal() {
        let dir = tempdir().unwrap();
        touch_all(dir.path(), &["a.mp3"]);

        let api = MockMusicBrainz::default().with_release(mock_release("rel", &[]));
        let (service, _) = service(api);

        let err = service
            .rename_album(&request(ReleaseSelector::Release("rel".to_string()), dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoTracks { .. }));
    }

    #[tokio::test]
    async fn test_unknown_release_is_fatal() {
        let dir = tempdir().unwrap();
        let (service, _) = service(MockMusicBrainz::default());

        let err = service
            .rename_album(&request(ReleaseSelector::Release("missing".to_string()), dir.path()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("release lookup for missing"));
    }

    #[tokio::test]
    async fn test_unreadable_directory_fails_before_network() {
        let dir = tempdir().unwrap();
        let api = MockMusicBrainz::default().with_release(mock_release("rel", &["A"]));
        let (service, _) = service(api);

        let err = service
            .rename_album(&request(ReleaseSelector::Release("rel".to_string()), &dir.path().join("nope")))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DirectoryUnreadable { .. }));
        assert!(service.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_more_tracks_than_files_leaves_one_unmatched() {
        let dir = tempdir().unwrap();
        touch_all(dir.path(), &["alpha.mp3", "bravo.mp3", "charlie.mp3", "delta.mp3"]);

        let api = MockMusicBrainz::default()
            .with_release(mock_release("rel", &["Alpha", "Bravo", "Charlie", "Delta", "Echo"]));
        let (service, _) = service(api);

        let run = service
            .rename_album(&request(ReleaseSelector::Release("rel".to_string()), dir.path()))
            .await
            .unwrap();

        assert_eq!(run.matches.unmatched_count(), 1);
        assert_eq!(run.report.renamed(), 4);
        assert!(dir.path().join("04 Delta.mp3").exists());
    }

    #[tokio::test]
    async fn test_find_ranks_groups_and_pauses_per_group() {
        let api = MockMusicBrainz::default()
            .with_search_results(vec![
                group("single", "Single", "1970-09"),
                group("album", "Album", "1970-09-18"),
                group("empty", "Album", "1971"),
            ])
            .with_group(
                "album",
                vec![
                    ReleaseCandidate {
                        disambiguation: Some("deluxe".to_string()),
                        ..mock_candidate("deluxe", "Official", 16)
                    },
                    mock_candidate("plain", "Official", 8),
                ],
            )
            .with_group("single", vec![mock_candidate("single-rel", "Official", 2)]);
        let (service, sleeper) = service(api);

        let found = service
            .find_release_groups("Black Sabbath", "Paranoid", 10, Some("US".to_string()))
            .await
            .unwrap();

        let rows: Vec<_> = found
            .iter()
            .map(|f| (f.group.id.as_str(), f.release_id.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("empty", None),
                ("album", Some("plain")),
                ("single", Some("single-rel")),
            ]
        );
        assert_eq!(sleeper.waits().len(), 3);
    }

    #[tokio::test]
    async fn test_find_with_no_hits_is_fatal() {
        let (service, _) = service(MockMusicBrainz::default());

        let err = service.find_release_groups("Nobody", "Nothing", 10, None).await.unwrap_err();
        assert!(matches!(err, Error::NoReleaseGroups { .. }));
    }
}
