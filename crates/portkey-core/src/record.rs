use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A shortened URL record as handed to the store at creation time.
///
/// Every field is immutable after creation; the hit count starts at zero and
/// lives inside the store, which is the only place it can be incremented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The unique short code keying this record.
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record expires.
    pub expires_at: Timestamp,
}

/// A point-in-time read of a stored link, including its hit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub code: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub hit_count: u64,
}

impl LinkSnapshot {
    /// Whether the link is expired as of `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    /// Converts the snapshot into a stats view evaluated at `now`.
    pub fn into_stats(self, now: Timestamp) -> LinkStats {
        let is_expired = self.is_expired_at(now);
        LinkStats {
            code: self.code,
            original_url: self.original_url,
            created_at: self.created_at,
            expires_at: self.expires_at,
            hit_count: self.hit_count,
            is_expired,
        }
    }
}

/// The read-only stats projection returned to callers.
///
/// Unlike resolution, stats are reported for expired links too; `is_expired`
/// tells the two cases apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    pub code: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub hit_count: u64,
    pub is_expired: bool,
}
