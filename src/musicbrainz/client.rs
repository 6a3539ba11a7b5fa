//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to
//! 1 req/sec. The client itself never waits; callers insert the fixed delay
//! through [`crate::throttle::Sleeper`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{MusicBrainzError, adapter, dto};
use crate::config::MusicBrainzConfig;
use crate::model::{ReleaseCandidate, ReleaseGroupSummary, ReleaseTracks};

/// User agent prefix - MusicBrainz requires this
const USER_AGENT: &str = concat!("mb-track-rename/", env!("CARGO_PKG_VERSION"));

/// Maximum page size the search endpoints accept
const SEARCH_PAGE_LIMIT: u32 = 100;

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MusicBrainzClient {
    /// Create a client from the `[musicbrainz]` config section
    pub fn new(config: &MusicBrainzConfig) -> Result<Self, MusicBrainzError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent(config.contact.as_deref()))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MusicBrainzError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a release with its media, tracks and track artist credits
    pub async fn lookup_release(&self, release_id: &str) -> Result<ReleaseTracks, MusicBrainzError> {
        let url = release_lookup_url(&self.base_url, release_id);
        let response: dto::ReleaseResponse = self.get_json(&url).await?;
        Ok(adapter::to_release_tracks(response))
    }

    /// List the releases belonging to a release group, in response order
    pub async fn releases_in_group(&self, release_group_id: &str) -> Result<Vec<ReleaseCandidate>, MusicBrainzError> {
        let url = releases_in_group_url(&self.base_url, release_group_id);
        let response: dto::ReleaseSearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_release_candidates(response))
    }

    /// Search release groups by artist name and album title
    pub async fn search_release_groups(
        &self,
        artist: &str,
        album: &str,
        limit: u32,
    ) -> Result<Vec<ReleaseGroupSummary>, MusicBrainzError> {
        let url = release_group_search_url(&self.base_url, artist, album, limit);
        let response: dto::ReleaseGroupSearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_release_groups(response))
    }

    /// Send a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MusicBrainzError> {
        debug!(url, "MusicBrainz request");

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| MusicBrainzError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MusicBrainzError::NotFound(url.to_string()));
        }

        // MusicBrainz answers 503 when the per-IP rate limit is exceeded
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(MusicBrainzError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MusicBrainzError::Parse(e.to_string()))
    }
}

/// Build the User-Agent header value, with an optional contact
fn user_agent(contact: Option<&str>) -> String {
    match contact.map(str::trim).filter(|c| !c.is_empty()) {
        Some(contact) => format!("{} ( {} )", USER_AGENT, contact),
        None => USER_AGENT.to_string(),
    }
}

/// Classify a non-success response body
fn http_error(status: u16, body: &str) -> MusicBrainzError {
    match serde_json::from_str::<dto::ApiError>(body) {
        Ok(error) => MusicBrainzError::Api {
            status,
            message: error.error,
        },
        Err(_) => MusicBrainzError::Http {
            status,
            body: body.trim().to_string(),
        },
    }
}

fn release_lookup_url(base_url: &str, release_id: &str) -> String {
    format!(
        "{}/release/{}?inc=media+recordings+artist-credits&fmt=json",
        base_url,
        urlencoding::encode(release_id)
    )
}

fn releases_in_group_url(base_url: &str, release_group_id: &str) -> String {
    let query = format!("rgid:{}", release_group_id);
    format!(
        "{}/release?query={}&fmt=json&limit={}",
        base_url,
        urlencoding::encode(&query),
        SEARCH_PAGE_LIMIT
    )
}

fn release_group_search_url(base_url: &str, artist: &str, album: &str, limit: u32) -> String {
    let query = format!(
        "artist:{} AND releasegroup:{}",
        quote_term(artist.trim()),
        quote_term(album.trim())
    );
    format!(
        "{}/release-group?query={}&fmt=json&limit={}",
        base_url,
        urlencoding::encode(&query),
        limit.clamp(1, SEARCH_PAGE_LIMIT)
    )
}

/// Quote a Lucene search term, escaping embedded quotes and backslashes
fn quote_term(term: &str) -> String {
    format!("\"{}\"", term.replace('\\', "\\\\").replace('"', "\\\""))
}
