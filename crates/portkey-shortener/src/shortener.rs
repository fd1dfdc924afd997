use crate::error::Result;
use async_trait::async_trait;
use jiff::Timestamp;
use portkey_core::{LinkStats, ShortCode};
use serde::{Deserialize, Serialize};

/// The result of shortening a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortenedUrl {
    /// The short code keying the record.
    pub code: ShortCode,
    /// The full shortened URL (base domain plus code).
    pub full_url: String,
    /// When the shortened URL expires.
    pub expires_at: Timestamp,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL, reusing a previously assigned code when one exists.
    ///
    /// Fails with [`GenerationExhausted`][crate::ShortenerError::GenerationExhausted]
    /// if every generation attempt collided with an existing code.
    async fn shorten(&self, original_url: &str, base_domain: &str) -> Result<ShortenedUrl>;

    /// Resolves a short code to its original URL, counting the hit.
    /// Returns `None` if the code does not exist or has expired.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Returns the stats view for a short code, expired or not.
    /// Returns `None` only if the code does not exist.
    async fn stats(&self, code: &ShortCode) -> Result<Option<LinkStats>>;
}
