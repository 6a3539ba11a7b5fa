//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI and `main` use `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum, every variant is fatal for a run
//! - [`MusicBrainzError`]: transport and decoding failures of the web service
//! - Per-item problems (unmatched tracks, failed renames) are NOT errors;
//!   they are reported as values by the matcher and the organizer.

use std::path::PathBuf;

pub use crate::musicbrainz::MusicBrainzError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// MusicBrainz request or response error
    #[error("MusicBrainz error: {0}")]
    MusicBrainz(#[from] MusicBrainzError),

    /// The release has no tracks (usually a wrong MBID)
    #[error("no tracks returned from MusicBrainz for release {release_id} (wrong MBID?)")]
    NoTracks { release_id: String },

    /// The release group has no releases
    #[error("no releases found for release group {release_group_id}")]
    NoReleases { release_group_id: String },

    /// A release-group search came back empty
    #[error("no release groups found for artist {artist:?} and album {album:?}")]
    NoReleaseGroups { artist: String, album: String },

    /// Identifier is not a MusicBrainz UUID
    #[error("invalid MBID format: {0}")]
    InvalidMbid(String),

    /// Directory could not be listed
    #[error("cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an unreadable-directory error.
    pub fn directory_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, MusicBrainzError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::MusicBrainz(e).context(ctx))
    }
}
