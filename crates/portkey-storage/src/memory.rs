use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use portkey_core::{LinkRecord, LinkSnapshot, LinkStore, ShortCode, StorageError};
use std::sync::atomic::{AtomicU64, Ordering};

type Result<T> = std::result::Result<T, StorageError>;

/// A stored link entry.
///
/// The creation-time fields never change after insertion; only the hit
/// counter is mutable, and only through [`LinkStore::increment_hits`].
#[derive(Debug)]
struct StoredLink {
    original_url: String,
    created_at: Timestamp,
    expires_at: Timestamp,
    hits: AtomicU64,
}

impl StoredLink {
    fn snapshot(&self, code: &ShortCode) -> LinkSnapshot {
        LinkSnapshot {
            code: code.clone(),
            original_url: self.original_url.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            hit_count: self.hits.load(Ordering::Relaxed),
        }
    }
}

/// In-memory implementation of the [`LinkStore`] trait using DashMap.
///
/// DashMap provides better concurrency than `RwLock<HashMap>` because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. The forward index keys codes to records; the
/// reverse index keys URLs to their most recently associated code.
///
/// Records are never removed: expiration is a read-time concern of the
/// service layer, not a storage sweep.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: DashMap<ShortCode, StoredLink>,
    codes_by_url: DashMap<String, ShortCode>,
}

impl InMemoryLinkStore {
    /// Creates a new in-memory link store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory link store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: DashMap::with_capacity(capacity),
            codes_by_url: DashMap::with_capacity(capacity),
        }
    }

    /// Number of live records in the forward index.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the forward index is empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn try_insert(&self, record: LinkRecord) -> Result<bool> {
        let LinkRecord {
            code,
            original_url,
            created_at,
            expires_at,
        } = record;

        // The entry API makes the check-and-set atomic on the key's shard:
        // of two concurrent inserts with the same code, exactly one lands.
        let inserted = match self.links.entry(code.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(StoredLink {
                    original_url: original_url.clone(),
                    created_at,
                    expires_at,
                    hits: AtomicU64::new(0),
                });
                true
            }
        };

        if inserted {
            self.codes_by_url.insert(original_url, code);
        }
        Ok(inserted)
    }

    async fn upsert_reverse(&self, url: &str, code: &ShortCode) -> Result<()> {
        self.codes_by_url.insert(url.to_owned(), code.clone());
        Ok(())
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<LinkSnapshot>> {
        Ok(self.links.get(code).map(|entry| entry.snapshot(code)))
    }

    async fn code_for_url(&self, url: &str) -> Result<Option<ShortCode>> {
        Ok(self.codes_by_url.get(url).map(|entry| entry.value().clone()))
    }

    async fn increment_hits(&self, code: &ShortCode) -> Result<bool> {
        let Some(entry) = self.links.get(code) else {
            return Ok(false);
        };
        entry.hits.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }
}
