//! Filename-to-track matching.
//!
//! Assigns each track of a release at most one local file, greedily and in
//! listing order. Scoring is plain substring containment on normalized
//! keys:
//!
//! | condition                                   | score        |
//! |---------------------------------------------|--------------|
//! | file key contains title key                 | 100          |
//! | title key contains file key                 | 50           |
//! | otherwise, per title word (len > 2) in file | 10 each      |
//!
//! A file claimed by an earlier track is never reconsidered, so an early
//! weak match can starve a later track of its best file. An empty title
//! normalizes to an empty key, which every file key contains; such a track
//! takes the first unused file with score 100.

use std::collections::HashSet;

use crate::model::Track;

/// Score for a file key containing the title key.
pub const SCORE_FILE_CONTAINS_TITLE: u32 = 100;
/// Score for a title key containing the file key.
pub const SCORE_TITLE_CONTAINS_FILE: u32 = 50;
/// Partial credit per shared title word.
pub const SCORE_PER_WORD: u32 = 10;

/// Title words this short or shorter earn no partial credit.
const MIN_WORD_LEN: usize = 3;

/// Canonical comparison key: ASCII letters and digits only, lowercased.
///
/// Non-ASCII letters are dropped rather than folded, so `"Café"` becomes
/// `"caf"`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase().chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Split a file name into (stem, extension), the extension keeping its dot.
///
/// The extension starts at the last `.` of the name; a name without a dot
/// has an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Precomputed comparison data for one track title.
#[derive(Debug, Clone)]
pub struct TitleKey {
    key: String,
    words: Vec<String>,
}

impl TitleKey {
    pub fn new(title: &str) -> Self {
        let words = title
            .split_whitespace()
            .map(normalize)
            .filter(|w| w.len() >= MIN_WORD_LEN)
            .collect();

        Self {
            key: normalize(title),
            words,
        }
    }

    /// Score a normalized file stem against this title.
    pub fn score(&self, file_key: &str) -> u32 {
        if file_key.contains(&self.key) {
            SCORE_FILE_CONTAINS_TITLE
        } else if self.key.contains(file_key) {
            SCORE_TITLE_CONTAINS_FILE
        } else {
            self.words
                .iter()
                .filter(|w| file_key.contains(w.as_str()))
                .count() as u32
                * SCORE_PER_WORD
        }
    }
}

/// A file claimed by a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub file: String,
    pub score: u32,
}

/// Problems worth telling the user about; none of them stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchWarning {
    /// Track and file counts differ (reported once, before matching)
    CountMismatch { tracks: usize, files: usize },
    /// No unused file scored above zero for this track
    Unmatched { index: usize, title: String },
}

impl std::fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CountMismatch { tracks, files } => {
                write!(f, "{} files but {} tracks, proceeding anyway", files, tracks)
            }
            Self::Unmatched { index, title } => {
                write!(f, "no match for track {} {:?}", index + 1, title)
            }
        }
    }
}

/// Result of one matching run.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// One slot per track, in track order
    pub assignments: Vec<Option<Assignment>>,
    pub warnings: Vec<MatchWarning>,
}

impl MatchOutcome {
    pub fn matched_count(&self) -> usize {
        self.assignments.iter().flatten().count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.assignments.len() - self.matched_count()
    }
}

/// Greedily assign files to tracks.
///
/// `tracks` must already be in listing order and `files` in the order
/// ties should be broken (earlier wins).
pub fn match_tracks(tracks: &[Track], files: &[String]) -> MatchOutcome {
    let mut outcome = MatchOutcome {
        assignments: Vec::with_capacity(tracks.len()),
        warnings: Vec::new(),
    };

    if tracks.len() != files.len() {
        outcome.warnings.push(MatchWarning::CountMismatch {
            tracks: tracks.len(),
            files: files.len(),
        });
    }

    let file_keys: Vec<String> = files.iter().map(|f| normalize(split_extension(f).0)).collect();
    let mut used: HashSet<usize> = HashSet::new();

    for (index, track) in tracks.iter().enumerate() {
        let title = TitleKey::new(&track.title);

        let mut best: Option<(usize, u32)> = None;
        for (file_idx, file_key) in file_keys.iter().enumerate() {
            if used.contains(&file_idx) {
                continue;
            }
            let score = title.score(file_key);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((file_idx, score));
            }
        }

        match best {
            Some((file_idx, score)) if score > 0 => {
                used.insert(file_idx);
                outcome.assignments.push(Some(Assignment {
                    file: files[file_idx].clone(),
                    score,
                }));
            }
            _ => {
                outcome.warnings.push(MatchWarning::Unmatched {
                    index,
                    title: track.title.clone(),
                });
                outcome.assignments.push(None);
            }
        }
    }

    outcome
}
