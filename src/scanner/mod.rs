//! Directory listing for rename candidates.
//!
//! Only the top level of the target directory is considered. Hidden entries
//! (leading `.`) and subdirectories are skipped. No extension filter is
//! applied: whatever sits in an album folder is a candidate.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// List candidate file names in `dir`, sorted by name.
///
/// Sorting makes the matcher's first-seen tie-break independent of the
/// order the OS happens to return entries in.
pub fn list_candidate_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::directory_unreadable(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::directory_unreadable(dir, e))?;

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        files.push(name);
    }

    files.sort();
    debug!(count = files.len(), dir = %dir.display(), "Listed candidate files");
    Ok(files)
}
