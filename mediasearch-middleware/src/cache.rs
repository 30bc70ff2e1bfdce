//! `moka`-backed TTL cache (§4.7): a single process-local cache shared by
//! both search pipelines, keyed by the cache-key string the orchestrator
//! builds, with a per-entry TTL taken from the inserted value rather than a
//! uniform cache-wide setting (station and podcast results, and different
//! provider mixes, carry different configured TTLs).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use mediasearch_core::cache::Cache;
use moka::Expiry;
use moka::future::Cache as MokaFutureCache;
#[cfg(feature = "tracing")]
use tracing::debug;

struct Entry {
    value: Vec<u8>,
    ttl: Duration,
}

struct VariableTtlExpiry;

impl Expiry<String, Entry> for VariableTtlExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Byte-oriented TTL cache backed by `moka::future::Cache`.
pub struct MokaCache {
    inner: MokaFutureCache<String, Entry>,
}

impl MokaCache {
    /// Build a cache bounded to at most `max_capacity` entries.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        let inner = MokaFutureCache::builder()
            .max_capacity(max_capacity)
            .expire_after(VariableTtlExpiry)
            .build();
        Self { inner }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl Cache for MokaCache {
    async fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        let hit = self.inner.get(key).await;
        #[cfg(feature = "tracing")]
        debug!(key, hit = hit.is_some(), "cache lookup");
        hit.map(|e| e.value)
    }

    async fn set_raw(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        self.inner
            .insert(key.to_string(), Entry { value, ttl })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediasearch_core::cache::TypedCacheExt;

    #[tokio::test]
    async fn stores_and_retrieves_typed_values() {
        let cache = MokaCache::new(100);
        cache.set("k", &vec![1, 2, 3], Duration::from_secs(60)).await;
        let got: Option<Vec<i32>> = cache.get("k").await;
        assert_eq!(got, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache = MokaCache::new(100);
        let got: Option<Vec<i32>> = cache.get("missing").await;
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn expired_entry_is_treated_as_a_miss() {
        let cache = MokaCache::new(100);
        cache.set_raw("k", vec![9], Duration::from_millis(10)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        cache.inner.run_pending_tasks().await;
        assert_eq!(cache.get_raw("k").await, None);
    }
}
