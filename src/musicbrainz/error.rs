/// Errors that can occur while talking to MusicBrainz.
///
/// Every variant is fatal for a run: there is no retry policy.
#[derive(Debug, thiserror::Error)]
pub enum MusicBrainzError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API request failed (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
