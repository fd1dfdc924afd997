use crate::error::StorageError;
use crate::record::{LinkRecord, LinkSnapshot};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, StorageError>;

/// A concurrent two-index store for shortened URL records.
///
/// Implementations maintain a forward index (code to record) and a reverse
/// index (url to code), both safe for unsynchronized concurrent access by
/// callers. The forward index is authoritative: the reverse index is
/// last-writer-wins per key and may transiently name a code with no live
/// record, which callers must tolerate.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Inserts the record only if its code is not already present.
    ///
    /// The check-and-set on the forward index is atomic: concurrent inserts
    /// with the same code resolve to exactly one winner. On success the
    /// reverse index entry `original_url -> code` is also set and `true` is
    /// returned; on conflict nothing is mutated and `false` is returned.
    async fn try_insert(&self, record: LinkRecord) -> Result<bool>;

    /// Unconditionally sets `url -> code` in the reverse index.
    ///
    /// Last-writer-wins; may be called redundantly with [`try_insert`].
    ///
    /// [`try_insert`]: LinkStore::try_insert
    async fn upsert_reverse(&self, url: &str, code: &ShortCode) -> Result<()>;

    /// Retrieves a snapshot of the record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<LinkSnapshot>>;

    /// Looks up the code most recently associated with a URL, if any.
    async fn code_for_url(&self, url: &str) -> Result<Option<ShortCode>>;

    /// Atomically increments the hit count of the record for `code`.
    ///
    /// Concurrent increments never lose updates. Returns `false` if the code
    /// does not exist.
    async fn increment_hits(&self, code: &ShortCode) -> Result<bool>;
}
