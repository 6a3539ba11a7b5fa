//! Fixed-delay self-throttling.
//!
//! MusicBrainz allows one request per second per client. Dependent
//! requests are separated by a flat pause; there is no adaptive backoff.
//! The pause goes through [`Sleeper`] so tests can record it instead of
//! actually waiting.

use std::time::Duration;

use async_trait::async_trait;

/// Something that can wait for a fixed duration.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock pause on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
