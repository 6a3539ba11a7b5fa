//! Output naming and in-place renaming.
//!
//! Turns matched (track, file) pairs into `"NN Title.ext"` (or
//! `"NN Artist - Title.ext"`) names and renames the files inside their
//! directory, one at a time.
//!
//! # Features
//! - Literal substitution table for characters filesystems dislike
//! - Dry-run mode that reports what would happen
//! - Per-file outcomes: a failed rename never stops the batch
//!
//! There is no undo: renames already performed stay in place when a later
//! one fails.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::matcher::{Assignment, split_extension};
use crate::model::Track;

/// Replace or drop characters that are illegal or awkward in file names.
///
/// Leading and trailing whitespace is trimmed first. The table is applied
/// in a single pass, so replacement text is never re-substituted.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        match c {
            '/' => out.push('／'),
            '\\' => out.push('＼'),
            ':' => out.push_str(" -"),
            '*' | '?' | '"' | '\'' => {}
            '<' => out.push('('),
            '>' => out.push(')'),
            '|' => out.push('-'),
            _ => out.push(c),
        }
    }
    out
}

/// Build the output name for track `number` (1-based).
///
/// With an artist: `"NN Artist - Title.ext"`, otherwise `"NN Title.ext"`.
/// `ext` is appended verbatim and should include its leading dot.
pub fn track_filename(number: usize, title: &str, artist: Option<&str>, ext: &str) -> String {
    match artist {
        Some(artist) => format!(
            "{:02} {} - {}{}",
            number,
            sanitize_filename(artist),
            sanitize_filename(title),
            ext
        ),
        None => format!("{:02} {}{}", number, sanitize_filename(title), ext),
    }
}

/// Naming switches for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingOptions {
    pub artist_in_filename: bool,
}

/// One planned rename inside the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// 1-based track number used in the new name
    pub track_number: usize,
    pub source: String,
    pub target: String,
}

/// What happened to one planned rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The file already has its target name
    Unchanged,
    /// Dry run: would have been renamed
    Planned,
    Renamed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RenameResult {
    pub plan: RenamePlan,
    pub outcome: RenameOutcome,
}

/// Per-file results of a rename batch, in track order
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub results: Vec<RenameResult>,
}

impl RenameReport {
    fn count(&self, pred: impl Fn(&RenameOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Renamed | RenameOutcome::Planned))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Failed(_)))
    }
}

/// Compute target names for every matched track, in track order.
///
/// `assignments` is indexed like `tracks`; unmatched slots produce no plan.
pub fn plan_renames(tracks: &[Track], assignments: &[Option<Assignment>], options: NamingOptions) -> Vec<RenamePlan> {
    tracks
        .iter()
        .zip(assignments)
        .enumerate()
        .filter_map(|(idx, (track, assignment))| {
            let assignment = assignment.as_ref()?;
            let number = idx + 1;
            let (_, ext) = split_extension(&assignment.file);
            let artist = options.artist_in_filename.then_some(track.artist.as_str());

            Some(RenamePlan {
                track_number: number,
                source: assignment.file.clone(),
                target: track_filename(number, &track.title, artist, ext),
            })
        })
        .collect()
}

/// Rename files inside `dir` according to `plans`, one at a time.
///
/// A target that already exists is refused unless it is the source itself
/// seen through a case-insensitive filesystem.
pub fn apply_renames(dir: &Path, plans: &[RenamePlan], dry_run: bool) -> RenameReport {
    let mut report = RenameReport::default();

    for plan in plans {
        let outcome = apply_one(dir, plan, dry_run);
        match &outcome {
            RenameOutcome::Renamed => info!("Renamed {:?} -> {:?}", plan.source, plan.target),
            RenameOutcome::Failed(reason) => warn!("Failed to rename {:?}: {}", plan.source, reason),
            _ => {}
        }
        report.results.push(RenameResult {
            plan: plan.clone(),
            outcome,
        });
    }

    report
}

fn apply_one(dir: &Path, plan: &RenamePlan, dry_run: bool) -> RenameOutcome {
    if plan.source == plan.target {
        return RenameOutcome::Unchanged;
    }

    let source = dir.join(&plan.source);
    let target = dir.join(&plan.target);

    if destination_taken(dir, plan) {
        return RenameOutcome::Failed(format!("destination {:?} already exists", plan.target));
    }

    if dry_run {
        return RenameOutcome::Planned;
    }

    match fs::rename(&source, &target) {
        Ok(()) => RenameOutcome::Renamed,
        Err(e) => RenameOutcome::Failed(e.to_string()),
    }
}

/// Whether renaming would clobber a different file.
///
/// On a case-insensitive filesystem a case-only target resolves to the
/// source itself; only a directory entry spelled exactly like the target
/// is a separate file.
fn destination_taken(dir: &Path, plan: &RenamePlan) -> bool {
    if fs::symlink_metadata(dir.join(&plan.target)).is_err() {
        return false;
    }
    if plan.source.to_lowercase() != plan.target.to_lowercase() {
        return true;
    }

    match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().any(|e| e.file_name() == plan.target.as_str()),
        Err(_) => true,
    }
}
