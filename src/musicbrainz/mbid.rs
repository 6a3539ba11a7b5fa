//! MBID (MusicBrainz identifier) validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static MBID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").expect("MBID pattern is valid")
});

/// True if `s` has the hyphenated UUID shape MusicBrainz uses.
pub fn is_valid_mbid(s: &str) -> bool {
    MBID_RE.is_match(s)
}

/// Trim, check and lowercase an MBID.
pub fn parse_mbid(s: &str) -> Result<String> {
    let trimmed = s.trim();
    if is_valid_mbid(trimmed) {
        Ok(trimmed.to_ascii_lowercase())
    } else {
        Err(Error::InvalidMbid(s.to_string()))
    }
}
