use crate::allocator::CodeAllocator;
use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use snipshare_core::error::StorageError;
use snipshare_core::{
    Clock, PublishParams, Repository, ShareCode, ShareError, ShareStore, SnippetRecord,
    SystemClock,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Default record lifetime: 24 hours from publication.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_hours(24);

/// A concrete implementation of the `ShareStore` trait.
///
/// Wraps a `Repository`, a `CodeAllocator`, and a `Clock` to handle:
/// - code allocation with an advisory live-set snapshot, backed by the
///   repository's check-then-insert as the enforcement layer
/// - liveness-aware lookup (expired and absent are the same `None`)
/// - sweep of expired records
///
/// Liveness is always evaluated against the registry's clock at read
/// time; correctness never depends on whether a sweep ran recently.
#[derive(Debug, Clone)]
pub struct ShareRegistry<R, A, C = SystemClock> {
    repository: Arc<R>,
    allocator: Arc<A>,
    clock: C,
    ttl: SignedDuration,
}

impl<R: Repository, A: CodeAllocator> ShareRegistry<R, A> {
    /// Creates a registry on the wall clock with the default 24h TTL.
    pub fn new(repository: R, allocator: A) -> Self {
        Self::with_clock(repository, allocator, SystemClock)
    }
}

impl<R: Repository, A: CodeAllocator, C: Clock> ShareRegistry<R, A, C> {
    /// Creates a registry with an explicit time source.
    pub fn with_clock(repository: R, allocator: A, clock: C) -> Self {
        Self {
            repository: Arc::new(repository),
            allocator: Arc::new(allocator),
            clock,
            ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the record lifetime.
    pub fn with_ttl(mut self, ttl: SignedDuration) -> Self {
        self.ttl = ttl;
        self
    }

    fn placeholder_title(created_at: Timestamp) -> String {
        format!("Shared {}", created_at.strftime("%Y-%m-%d %H:%M:%S"))
    }

    async fn publish_at(
        &self,
        params: PublishParams,
        now: Timestamp,
    ) -> Result<ShareCode, ShareError> {
        if params.body.trim().is_empty() {
            return Err(ShareError::InvalidInput(
                "snippet body must not be empty".to_string(),
            ));
        }

        let title = match params.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => Self::placeholder_title(now),
        };

        let record = SnippetRecord {
            title,
            body: params.body,
            language: params.language,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut taken = self.repository.live_codes(now).await?;

        loop {
            let code = self.allocator.allocate(&taken)?;
            match self.repository.insert(&code, record.clone()).await {
                Ok(()) => {
                    debug!(code = %code, expires_at = %record.expires_at, "published snippet");
                    return Ok(code);
                }
                // A concurrent publisher won the race past the advisory
                // snapshot. Exclude the code and re-allocate; the
                // snapshot grows every round, so the loop ends in
                // `CapacityExhausted` at the latest.
                Err(StorageError::Conflict(_)) => {
                    taken.insert(code);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn lookup_at(
        &self,
        code: &ShareCode,
        now: Timestamp,
    ) -> Result<Option<SnippetRecord>, ShareError> {
        let Some(record) = self.repository.get(code).await? else {
            return Ok(None);
        };

        // Expired collapses into absent; the read path never deletes.
        if record.is_expired(now) {
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Removes every record with `expires_at <= now`.
    pub async fn sweep_at(&self, now: Timestamp) -> Result<u64, ShareError> {
        let removed = self.repository.sweep(now).await?;
        if removed > 0 {
            info!(removed, "swept expired snippets");
        }
        Ok(removed)
    }
}

#[async_trait]
impl<R: Repository, A: CodeAllocator, C: Clock> ShareStore for ShareRegistry<R, A, C> {
    async fn publish(&self, params: PublishParams) -> Result<ShareCode, ShareError> {
        self.publish_at(params, self.clock.now()).await
    }

    async fn lookup(&self, code: &ShareCode) -> Result<Option<SnippetRecord>, ShareError> {
        self.lookup_at(code, self.clock.now()).await
    }

    async fn sweep(&self) -> Result<u64, ShareError> {
        self.sweep_at(self.clock.now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::RandomAllocator;
    use snipshare_core::repository::{ReadRepository, Result as RepoResult};
    use snipshare_core::{Language, ManualClock};
    use snipshare_storage::InMemoryRepository;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn t0() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn params(body: &str) -> PublishParams {
        PublishParams {
            title: Some("t".to_string()),
            body: body.to_string(),
            language: Language::Python,
        }
    }

    fn test_registry() -> ShareRegistry<InMemoryRepository, RandomAllocator, ManualClock> {
        ShareRegistry::with_clock(
            InMemoryRepository::new(),
            RandomAllocator::new(),
            ManualClock::new(t0()),
        )
    }

    #[tokio::test]
    async fn publish_returns_a_four_digit_numeric_code() {
        let registry = test_registry();

        let code = registry.publish(params("print(1)")).await.unwrap();
        assert_eq!(code.as_str().len(), 4);
        assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn lookup_after_publish_returns_the_record_verbatim() {
        let registry = test_registry();

        let code = registry
            .publish(PublishParams {
                title: Some("fizzbuzz".to_string()),
                body: "  print(1)\n".to_string(),
                language: Language::Python,
            })
            .await
            .unwrap();

        let record = registry.lookup(&code).await.unwrap().unwrap();
        assert_eq!(record.title, "fizzbuzz");
        assert_eq!(record.body, "  print(1)\n");
        assert_eq!(record.language, Language::Python);
        assert_eq!(record.created_at, t0());
        assert_eq!(record.expires_at, t0() + SignedDuration::from_hours(24));
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let registry = test_registry();

        for body in ["", "   ", "\n\t"] {
            let err = registry.publish(params(body)).await.unwrap_err();
            assert!(matches!(err, ShareError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn missing_title_gets_a_timestamped_placeholder() {
        let registry = test_registry();

        for title in [None, Some("".to_string()), Some("  ".to_string())] {
            let code = registry
                .publish(PublishParams {
                    title,
                    body: "x".to_string(),
                    language: Language::Plaintext,
                })
                .await
                .unwrap();

            let record = registry.lookup(&code).await.unwrap().unwrap();
            assert!(record.title.starts_with("Shared "), "{}", record.title);
        }
    }

    #[tokio::test]
    async fn codes_are_pairwise_distinct() {
        let registry = test_registry();
        let mut codes = HashSet::new();

        for _ in 0..50 {
            let code = registry.publish(params("x")).await.unwrap();
            assert!(codes.insert(code));
        }
    }

    #[tokio::test]
    async fn lookup_of_a_never_published_code_is_none() {
        let registry = test_registry();

        let result = registry
            .lookup(&ShareCode::new("1234").unwrap())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn lookup_is_repeatable_and_does_not_consume() {
        let registry = test_registry();
        let code = registry.publish(params("x")).await.unwrap();

        let first = registry.lookup(&code).await.unwrap().unwrap();
        let second = registry.lookup(&code).await.unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expiry_scenario() {
        let registry = test_registry();
        let clock = registry.clock.clone();

        let code = registry
            .publish(PublishParams {
                title: Some("t".to_string()),
                body: "print(1)".to_string(),
                language: Language::Python,
            })
            .await
            .unwrap();

        // Still live one hour in.
        clock.advance(SignedDuration::from_hours(1));
        let record = registry.lookup(&code).await.unwrap().unwrap();
        assert_eq!(record.body, "print(1)");

        // Past the 24h window: expired is indistinguishable from absent.
        clock.advance(SignedDuration::from_hours(24));
        assert!(registry.lookup(&code).await.unwrap().is_none());

        // The sweep reclaims it; lookup stays `None` afterwards.
        assert!(registry.sweep().await.unwrap() >= 1);
        assert!(registry.lookup(&code).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_rechecks_expiry_without_a_sweep() {
        let registry = test_registry();
        let clock = registry.clock.clone();

        let code = registry.publish(params("x")).await.unwrap();
        clock.advance(SignedDuration::from_hours(25));

        // No sweep has run; the read path must classify on its own.
        assert!(registry.lookup(&code).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_is_idempotent_at_the_service_level() {
        let registry = test_registry();
        let clock = registry.clock.clone();

        registry.publish(params("x")).await.unwrap();
        registry.publish(params("y")).await.unwrap();

        clock.advance(SignedDuration::from_hours(25));
        assert_eq!(registry.sweep().await.unwrap(), 2);
        assert_eq!(registry.sweep().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn a_swept_code_can_be_reissued() {
        let registry = test_registry();
        let clock = registry.clock.clone();

        let mut taken = HashSet::new();
        for _ in 0..20 {
            taken.insert(registry.publish(params("x")).await.unwrap());
        }

        clock.advance(SignedDuration::from_hours(25));
        registry.sweep().await.unwrap();

        // Freed codes are fair game again; uniqueness is only required
        // among live records.
        for _ in 0..20 {
            registry.publish(params("y")).await.unwrap();
        }
    }

    #[tokio::test]
    async fn saturated_keyspace_surfaces_capacity_exhausted() {
        let repo = InMemoryRepository::new();
        // Force 9000 simultaneous live codes.
        for n in 1000..=9999u16 {
            repo.insert(
                &ShareCode::new_unchecked(n.to_string()),
                SnippetRecord {
                    title: "t".to_string(),
                    body: "x".to_string(),
                    language: Language::Plaintext,
                    created_at: t0(),
                    expires_at: t0() + SignedDuration::from_hours(24),
                },
            )
            .await
            .unwrap();
        }

        let registry =
            ShareRegistry::with_clock(repo, RandomAllocator::new(), ManualClock::new(t0()));

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            registry.publish(params("one too many")),
        )
        .await
        .expect("allocation must not livelock");

        assert!(matches!(result.unwrap_err(), ShareError::CapacityExhausted));
    }

    /// Repository double that rejects the first insert with `Conflict`,
    /// simulating a concurrent publisher winning the race past the
    /// advisory snapshot.
    struct ConflictOnce {
        inner: InMemoryRepository,
        tripped: AtomicBool,
    }

    #[async_trait]
    impl ReadRepository for ConflictOnce {
        async fn get(&self, code: &ShareCode) -> RepoResult<Option<SnippetRecord>> {
            self.inner.get(code).await
        }

        async fn live_codes(&self, now: Timestamp) -> RepoResult<HashSet<ShareCode>> {
            self.inner.live_codes(now).await
        }
    }

    #[async_trait]
    impl Repository for ConflictOnce {
        async fn insert(&self, code: &ShareCode, record: SnippetRecord) -> RepoResult<()> {
            if !self.tripped.swap(true, Ordering::SeqCst) {
                return Err(StorageError::Conflict(code.to_string()));
            }
            self.inner.insert(code, record).await
        }

        async fn sweep(&self, now: Timestamp) -> RepoResult<u64> {
            self.inner.sweep(now).await
        }
    }

    #[tokio::test]
    async fn publish_reallocates_after_losing_an_insert_race() {
        let repo = ConflictOnce {
            inner: InMemoryRepository::new(),
            tripped: AtomicBool::new(false),
        };
        let registry =
            ShareRegistry::with_clock(repo, RandomAllocator::new(), ManualClock::new(t0()));

        let code = registry.publish(params("raced")).await.unwrap();
        let record = registry.lookup(&code).await.unwrap().unwrap();
        assert_eq!(record.body, "raced");
    }

    #[tokio::test]
    async fn custom_ttl_is_respected() {
        let registry = ShareRegistry::with_clock(
            InMemoryRepository::new(),
            RandomAllocator::new(),
            ManualClock::new(t0()),
        )
        .with_ttl(SignedDuration::from_hours(1));
        let clock = registry.clock.clone();

        let code = registry.publish(params("short-lived")).await.unwrap();
        let record = registry.lookup(&code).await.unwrap().unwrap();
        assert_eq!(record.expires_at, t0() + SignedDuration::from_hours(1));

        clock.advance(SignedDuration::from_hours(2));
        assert!(registry.lookup(&code).await.unwrap().is_none());
    }
}
