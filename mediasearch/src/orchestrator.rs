//! `SearchOrchestrator` (§4.1): the fan-out/dedupe/rank/cache pipeline
//! shared by station and podcast search, generic over the canonical item
//! type so one implementation serves both pipelines.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use serde::de::DeserializeOwned;

use mediasearch_core::cache::{Cache, TypedCacheExt};
use mediasearch_core::dedup::{Deduper, Mergeable};
use mediasearch_core::error::ProviderError;
use mediasearch_core::provider::SearchParams;
use mediasearch_core::rank::{Ranked, Ranker};
use mediasearch_core::rate_limit::RateLimiter;
#[cfg(feature = "tracing")]
use tracing::warn;

use crate::registry::ProviderRegistry;

/// Multiplier applied to the configured cache TTL for queries that carry no
/// free-text term (filter-only or fully empty): these vary less across
/// callers than freeform queries, so they're cheap to serve stale longer.
const FILTER_ONLY_TTL_MULTIPLIER: u32 = 5;
/// Fallback cache TTL when no queried provider has one configured.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
/// Fallback per-call deadline for a provider with no configured timeout
/// registered (should not happen once the registry is built from
/// `ProviderConfig::from_env`, which always sets one).
const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the full search pipeline (§4.1, steps 1-11) for one canonical item
/// type. `mediasearch::stations()` and `mediasearch::podcasts()` each build
/// one of these, parameterized by cache-key function and registry.
pub struct SearchOrchestrator<T> {
    registry: ProviderRegistry<T>,
    cache: Arc<dyn Cache>,
    rate_limiter: Arc<dyn RateLimiter>,
    cache_key: fn(&SearchParams) -> String,
}

impl<T> SearchOrchestrator<T>
where
    T: Mergeable + Ranked + Clone + Send + Sync + Serialize + DeserializeOwned,
{
    /// Build an orchestrator over `registry`, sharing `cache` and
    /// `rate_limiter` across every provider call. `cache_key` computes the
    /// bit-exact key for this pipeline (see `cache_key::for_stations` /
    /// `cache_key::for_podcasts`).
    #[must_use]
    pub fn new(
        registry: ProviderRegistry<T>,
        cache: Arc<dyn Cache>,
        rate_limiter: Arc<dyn RateLimiter>,
        cache_key: fn(&SearchParams) -> String,
    ) -> Self {
        Self {
            registry,
            cache,
            rate_limiter,
            cache_key,
        }
    }

    /// Registry backing this orchestrator, for status reporting.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry<T> {
        &self.registry
    }

    /// Run the pipeline for `params`. `params.limit` must already be
    /// clamped by the caller (see `SearchLimits::clamp`) — the orchestrator
    /// truncates to whatever limit it is given without re-validating it.
    ///
    /// Dropping the returned future (e.g. the caller wrapping this call in
    /// a `tokio::select!` or an outer timeout) cooperatively cancels every
    /// in-flight provider call and discards any partial results; nothing is
    /// written to the cache in that case, matching §5's cancellation rule.
    pub async fn search(&self, params: SearchParams) -> Vec<T> {
        let key = (self.cache_key)(&params);
        if !params.bypass_cache {
            if let Some(cached) = self.cache.get::<Vec<T>>(&key).await {
                return cached;
            }
        }

        let providers = self.registry.enabled(&params.provider_filter);
        if providers.is_empty() {
            #[cfg(feature = "tracing")]
            warn!("no enabled providers available for this search, returning empty");
            return Vec::new();
        }

        let base_ttl = providers
            .iter()
            .filter_map(|p| self.registry.config_of(p.name()).map(|c| c.cache_ttl))
            .min()
            .unwrap_or(DEFAULT_CACHE_TTL);

        let mut calls = FuturesUnordered::new();
        for (priority, provider) in providers.into_iter().enumerate() {
            let name = provider.name();
            let timeout = self
                .registry
                .config_of(name)
                .map_or(DEFAULT_PROVIDER_TIMEOUT, |c| c.timeout);
            let rate_limiter = Arc::clone(&self.rate_limiter);
            let params = params.clone();
            calls.push(async move {
                if !rate_limiter.admit(name).await {
                    #[cfg(feature = "tracing")]
                    warn!(
                        provider = name.as_str(),
                        error = %ProviderError::ProviderRateLimited { provider: name.as_str() },
                        "quota exhausted, skipping call"
                    );
                    return (priority, Vec::new());
                }
                let items = match tokio::time::timeout(timeout, provider.search(&params)).await {
                    Ok(items) => items,
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        warn!(
                            provider = name.as_str(),
                            error = %ProviderError::CancelledByCaller,
                            "provider call exceeded its deadline"
                        );
                        Vec::new()
                    }
                };
                (priority, items)
            });
        }

        // `FuturesUnordered` drains in completion order, not the
        // provider-priority order they were pushed in, so the per-call
        // results are tagged with their original index and sorted back into
        // priority order here before ever reaching the deduper — atomic
        // fields must fall to the higher-priority provider regardless of
        // which provider's request happens to resolve first.
        let mut by_priority: Vec<(usize, Vec<T>)> = Vec::new();
        while let Some(result) = calls.next().await {
            by_priority.push(result);
        }
        by_priority.sort_by_key(|(priority, _)| *priority);

        let mut collected = Vec::new();
        for (_, items) in by_priority {
            collected.extend(items);
        }

        for item in &mut collected {
            item.stamp_provenance();
        }

        let mut merged = Deduper::merge(collected);
        let priorities = self.registry.priorities();
        Ranker::rank(&mut merged, &priorities);
        merged.truncate(params.limit as usize);

        let ttl = if params.query_str().is_none() {
            base_ttl.saturating_mul(FILTER_ONLY_TTL_MULTIPLIER)
        } else {
            base_ttl
        };
        self.cache.set(&key, &merged, ttl).await;

        merged
    }
}
