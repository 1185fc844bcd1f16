use crate::models::Candidate;
use crate::services::{CandidateSource, SourceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// In-memory caching layer in front of a candidate source
///
/// The candidate list changes rarely compared to how often users move,
/// so the list is cached for `ttl_secs` while distances are always
/// recomputed per request. Failed fetches are never cached.
pub struct CachedCandidateSource<A> {
    inner: Arc<dyn CandidateSource<A>>,
    cache: moka::future::Cache<String, Arc<Vec<Candidate<A>>>>,
}

impl<A: Clone + Send + Sync + 'static> CachedCandidateSource<A> {
    /// Create a new caching source
    pub fn new(inner: Arc<dyn CandidateSource<A>>, max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Drop every cached candidate list
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Invalidated candidate cache");
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            entries: self.cache.entry_count(),
        }
    }
}

#[async_trait]
impl<A: Clone + Send + Sync + 'static> CandidateSource<A> for CachedCandidateSource<A> {
    /// Concurrent misses share a single fetch of the inner source
    async fn fetch_candidates(&self) -> Result<Vec<Candidate<A>>, SourceError> {
        let key = CacheKey::active_kitchens();

        let candidates = self
            .cache
            .try_get_with(key.clone(), async {
                tracing::trace!("Cache miss: {}", key);
                self.inner.fetch_candidates().await.map(Arc::new)
            })
            .await
            .map_err(unshare_error)?;

        Ok(candidates.as_ref().clone())
    }
}

/// Recover the fetch error handed out by the cache
///
/// Waiters on the same miss all receive one shared error; any of them that
/// cannot take ownership gets its message instead.
fn unshare_error(error: Arc<SourceError>) -> SourceError {
    Arc::try_unwrap(error).unwrap_or_else(|shared| SourceError::Unavailable(shared.to_string()))
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the list of kitchens open for orders
    pub fn active_kitchens() -> String {
        "kitchens:active".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl CountingSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
                delay: Duration::ZERO,
            })
        }

        fn slow(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
                delay: Duration::from_millis(50),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CandidateSource<()> for CountingSource {
        async fn fetch_candidates(&self) -> Result<Vec<Candidate<()>>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(SourceError::Unavailable("offline".to_string()));
            }
            Ok(vec![Candidate::new("k1", "Kitchen One", ()).with_rating(4.0)])
        }
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let source = CountingSource::new(false);
        let cached = CachedCandidateSource::<()>::new(source.clone(), 10, 60);

        let first = cached.fetch_candidates().await.unwrap();
        let second = cached.fetch_candidates().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
        assert_eq!(cached.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = CountingSource::new(true);
        let cached = CachedCandidateSource::<()>::new(source.clone(), 10, 60);

        assert!(cached.fetch_candidates().await.is_err());
        assert!(cached.fetch_candidates().await.is_err());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_fetch() {
        let source = CountingSource::slow(false);
        let cached = CachedCandidateSource::<()>::new(source.clone(), 10, 60);

        let (first, second, third) = tokio::join!(
            cached.fetch_candidates(),
            cached.fetch_candidates(),
            cached.fetch_candidates()
        );

        assert_eq!(first.unwrap().len(), 1);
        assert_eq!(second.unwrap().len(), 1);
        assert_eq!(third.unwrap().len(), 1);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_failure_reaches_every_caller() {
        let source = CountingSource::slow(true);
        let cached = CachedCandidateSource::<()>::new(source.clone(), 10, 60);

        let (first, second) = tokio::join!(cached.fetch_candidates(), cached.fetch_candidates());

        assert!(matches!(first, Err(SourceError::Unavailable(_))));
        assert!(matches!(second, Err(SourceError::Unavailable(_))));
        assert_eq!(source.calls(), 1);
        assert_eq!(cached.stats().await.entries, 0);
    }

    #[test]
    fn test_unshare_error_keeps_sole_error() {
        let error = unshare_error(Arc::new(SourceError::Unavailable("offline".to_string())));
        assert_eq!(error.to_string(), "Candidate source unavailable: offline");

        let shared = Arc::new(SourceError::Unavailable("offline".to_string()));
        let _other_waiter = Arc::clone(&shared);
        assert!(matches!(unshare_error(shared), SourceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = CountingSource::new(false);
        let cached = CachedCandidateSource::<()>::new(source.clone(), 10, 60);

        cached.fetch_candidates().await.unwrap();
        cached.invalidate();
        cached.fetch_candidates().await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::active_kitchens(), "kitchens:active");
    }
}
