use crate::error::{Result, ShortenerError};
use crate::shortener::{ShortenedUrl, Shortener};
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use portkey_core::{LinkRecord, LinkStats, LinkStore, ShortCode};
use portkey_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Total length of generated codes: two shard symbols plus six payload
/// symbols.
pub const CODE_LENGTH: usize = 8;

/// Bounded retry budget for the generate-and-insert loop.
pub const MAX_GENERATE_ATTEMPTS: u32 = 10;

/// How long a shortened URL stays resolvable: five 365-day years.
pub const RETENTION: SignedDuration = SignedDuration::from_secs(5 * 365 * 24 * 60 * 60);

/// The shortening orchestrator.
///
/// A cheap request-scoped value that borrows shared handles to the store and
/// the generator; it carries no mutable state of its own. The store and
/// generator are constructed once at process start and live until shutdown.
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<S: LinkStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new service over shared store and generator handles.
    pub fn new(store: Arc<S>, generator: Arc<G>) -> Self {
        Self { store, generator }
    }
}

#[async_trait]
impl<S: LinkStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, original_url: &str, base_domain: &str) -> Result<ShortenedUrl> {
        trace!(url = %original_url, "shortening url");

        // Idempotency check: a URL that already has a live record keeps its
        // code. A reverse entry pointing at a missing record is a tolerated
        // inconsistency; recovery is to mint a fresh code below.
        if let Some(code) = self.store.code_for_url(original_url).await? {
            match self.store.get(&code).await? {
                Some(snapshot) => {
                    debug!(code = %code, url = %original_url, "reusing existing code");
                    return Ok(ShortenedUrl {
                        full_url: code.to_url(base_domain),
                        expires_at: snapshot.expires_at,
                        code,
                    });
                }
                None => {
                    debug!(code = %code, url = %original_url, "reverse index names a missing record");
                }
            }
        }

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = self.generator.generate(CODE_LENGTH)?;
            let now = Timestamp::now();
            let expires_at = now + RETENTION;
            let record = LinkRecord {
                code: code.clone(),
                original_url: original_url.to_owned(),
                created_at: now,
                expires_at,
            };

            if self.store.try_insert(record).await? {
                // Redundant with try_insert, but keeps the reverse index
                // consistent even if an insert path ever skips it.
                self.store.upsert_reverse(original_url, &code).await?;
                debug!(code = %code, url = %original_url, attempt, "created shortened url");
                return Ok(ShortenedUrl {
                    full_url: code.to_url(base_domain),
                    expires_at,
                    code,
                });
            }

            debug!(code = %code, attempt, "generated code already taken");
        }

        warn!(url = %original_url, attempts = MAX_GENERATE_ATTEMPTS, "code generation exhausted");
        Err(ShortenerError::GenerationExhausted {
            attempts: MAX_GENERATE_ATTEMPTS,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "resolving short code");

        let Some(snapshot) = self.store.get(code).await? else {
            trace!(code = %code, "short code not found");
            return Ok(None);
        };

        // Expired links are indistinguishable from absent ones here.
        if snapshot.is_expired_at(Timestamp::now()) {
            debug!(code = %code, "short code has expired");
            return Ok(None);
        }

        // Best effort: a lost increment must not block returning the URL.
        if !self.store.increment_hits(code).await? {
            warn!(code = %code, "hit count increment found no record");
        }

        debug!(code = %code, url = %snapshot.original_url, "resolved short code");
        Ok(Some(snapshot.original_url))
    }

    async fn stats(&self, code: &ShortCode) -> Result<Option<LinkStats>> {
        trace!(code = %code, "fetching stats");

        let Some(snapshot) = self.store.get(code).await? else {
            trace!(code = %code, "short code not found");
            return Ok(None);
        };

        Ok(Some(snapshot.into_stats(Timestamp::now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portkey_generator::{GeneratorError, ShardedGenerator, ShardedGeneratorSettings};
    use portkey_storage::InMemoryLinkStore;

    const BASE: &str = "https://sho.rt";

    fn service() -> ShortenerService<InMemoryLinkStore, ShardedGenerator> {
        service_with(Arc::new(InMemoryLinkStore::new()))
    }

    fn service_with(
        store: Arc<InMemoryLinkStore>,
    ) -> ShortenerService<InMemoryLinkStore, ShardedGenerator> {
        let generator =
            ShardedGenerator::new(ShardedGeneratorSettings::builder().build()).unwrap();
        ShortenerService::new(store, Arc::new(generator))
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    /// A generator that always returns the same code, to force collisions.
    struct StuckGenerator;

    impl Generator for StuckGenerator {
        fn generate(&self, _total_length: usize) -> std::result::Result<ShortCode, GeneratorError> {
            Ok(ShortCode::new_unchecked("A0zzzzzz"))
        }
    }

    #[tokio::test]
    async fn first_code_is_deterministic() {
        let service = service();

        let shortened = service.shorten("http://example.com", BASE).await.unwrap();

        assert_eq!(shortened.code.as_str(), "A0000001");
        assert_eq!(shortened.full_url, "https://sho.rt/A0000001");
    }

    #[tokio::test]
    async fn shorten_is_idempotent_per_url() {
        let service = service();

        let first = service.shorten("https://example.com", BASE).await.unwrap();
        let second = service.shorten("https://example.com", BASE).await.unwrap();

        assert_eq!(first.code, second.code);
        assert_eq!(first.expires_at, second.expires_at);

        // The repeated call did not burn a sequence value.
        let other = service.shorten("https://other.com", BASE).await.unwrap();
        assert_eq!(other.code.as_str(), "A0000002");
    }

    #[tokio::test]
    async fn expiry_is_retention_from_creation() {
        let service = service();

        let before = Timestamp::now();
        let shortened = service.shorten("https://example.com", BASE).await.unwrap();
        let after = Timestamp::now();

        assert!(shortened.expires_at >= before + RETENTION);
        assert!(shortened.expires_at <= after + RETENTION);
    }

    #[tokio::test]
    async fn resolve_returns_the_original_url() {
        let service = service();
        let shortened = service.shorten("https://example.com", BASE).await.unwrap();

        let url = service.resolve(&shortened.code).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn resolve_unknown_code() {
        let service = service();

        assert!(service.resolve(&code("A0zzzzzz")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stats_unknown_code() {
        let service = service();

        assert!(service.stats(&code("A0zzzzzz")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_counts_hits_but_stats_does_not() {
        let service = service();
        let shortened = service.shorten("https://example.com", BASE).await.unwrap();

        service.resolve(&shortened.code).await.unwrap();
        service.resolve(&shortened.code).await.unwrap();

        let stats = service.stats(&shortened.code).await.unwrap().unwrap();
        assert_eq!(stats.hit_count, 2);

        // Stats reads never touch the counter.
        let stats = service.stats(&shortened.code).await.unwrap().unwrap();
        assert_eq!(stats.hit_count, 2);
        assert!(!stats.is_expired);
        assert_eq!(stats.original_url, "https://example.com");
        assert_eq!(stats.code, shortened.code);
    }

    #[tokio::test]
    async fn expired_code_resolves_to_none_but_keeps_stats() {
        let store = Arc::new(InMemoryLinkStore::new());
        let service = service_with(Arc::clone(&store));

        let now = Timestamp::now();
        store
            .try_insert(LinkRecord {
                code: code("A0000001"),
                original_url: "https://example.com".to_string(),
                created_at: now - SignedDuration::from_hours(2),
                expires_at: now - SignedDuration::from_secs(1),
            })
            .await
            .unwrap();

        assert!(service.resolve(&code("A0000001")).await.unwrap().is_none());

        let stats = service.stats(&code("A0000001")).await.unwrap().unwrap();
        assert!(stats.is_expired);
        assert_eq!(stats.original_url, "https://example.com");
        // The failed resolve did not count a hit.
        assert_eq!(stats.hit_count, 0);
    }

    #[tokio::test]
    async fn dangling_reverse_entry_falls_through_to_generation() {
        let store = Arc::new(InMemoryLinkStore::new());
        let service = service_with(Arc::clone(&store));

        // Reverse index names a code that has no forward record.
        store
            .upsert_reverse("https://example.com", &code("A0zzzzzz"))
            .await
            .unwrap();

        let shortened = service.shorten("https://example.com", BASE).await.unwrap();
        assert_eq!(shortened.code.as_str(), "A0000001");

        // The reverse index now points at the live record again.
        let found = store.code_for_url("https://example.com").await.unwrap();
        assert_eq!(found, Some(shortened.code));
    }

    #[tokio::test]
    async fn collision_retries_until_a_free_code() {
        let store = Arc::new(InMemoryLinkStore::new());
        let service = service_with(Arc::clone(&store));

        // Occupy the code the generator will produce first.
        let now = Timestamp::now();
        store
            .try_insert(LinkRecord {
                code: code("A0000001"),
                original_url: "https://occupant.com".to_string(),
                created_at: now,
                expires_at: now + RETENTION,
            })
            .await
            .unwrap();

        let shortened = service.shorten("https://example.com", BASE).await.unwrap();
        assert_eq!(shortened.code.as_str(), "A0000002");
    }

    #[tokio::test]
    async fn exhausted_retries_surface_an_error() {
        let store = Arc::new(InMemoryLinkStore::new());
        let service = ShortenerService::new(Arc::clone(&store), Arc::new(StuckGenerator));

        // First URL claims the only code the stuck generator can produce.
        service.shorten("https://first.com", BASE).await.unwrap();

        let err = service.shorten("https://second.com", BASE).await.unwrap_err();
        assert!(matches!(
            err,
            ShortenerError::GenerationExhausted {
                attempts: MAX_GENERATE_ATTEMPTS
            }
        ));
    }
}
