//! The uniform provider contract (§4.3): `name`, `requires_auth`,
//! `is_available`, `search`. Every adapter implements this trait generically
//! over its item type, so the same orchestrator/dedup/rank machinery serves
//! both the station and podcast pipelines.

use async_trait::async_trait;
use mediasearch_types::ProviderName;

/// Normalized search parameters shared by every provider call.
///
/// Filter strings are passed to providers in their original case; the
/// orchestrator lowercases/trims its own copies only for cache-key purposes.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Free-text query. Required (non-empty) for queries that need a term;
    /// some adapters (Keyword Directory) synthesize one when absent.
    pub query: Option<String>,
    /// Optional country filter.
    pub country: Option<String>,
    /// Optional language filter.
    pub language: Option<String>,
    /// Optional tag/genre filter (station search only).
    pub tag: Option<String>,
    /// Clamped result limit, already bounded into `[1, configured max]`.
    pub limit: u32,
    /// Requested page, 1-based; station search only.
    pub page: u32,
    /// If set, only providers in this set were selected by the caller — the
    /// registry has already filtered to these, but adapters may still use
    /// this for logging.
    pub provider_filter: Vec<ProviderName>,
    /// Skip the cache lookup and force a fresh fan-out, for observability
    /// (debugging a stale-looking result). The fresh result still
    /// overwrites the cache entry afterward, so it does not poison
    /// subsequent normal lookups.
    pub bypass_cache: bool,
}

impl SearchParams {
    /// Query trimmed to a borrowed `&str`, or `None` if absent/blank.
    #[must_use]
    pub fn query_str(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// The uniform adapter contract implemented by every concrete provider.
///
/// Adapters never throw to the orchestrator: any upstream failure is caught
/// internally, logged at `warn`, and mapped to an empty result. The
/// infallible `Vec<Self::Item>` return type encodes this at the type level.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The canonical item type this provider searches for (`StationItem` or
    /// `PodcastItem`).
    type Item: Send;

    /// Stable provider identity used in registry, ranker, and rate limiter.
    fn name(&self) -> ProviderName;

    /// Whether this provider requires credentials to function.
    fn requires_auth(&self) -> bool;

    /// Whether this provider is currently usable (credentials present when
    /// required, adapter otherwise configured). Checked by the registry
    /// before admission; a provider that is not available contributes
    /// nothing and is treated the same as an empty result, not a failure.
    fn is_available(&self) -> bool;

    /// Issue the search against this provider's upstream and normalize the
    /// response into canonical items. Never returns an error: any upstream
    /// failure becomes an empty vector.
    async fn search(&self, params: &SearchParams) -> Vec<Self::Item>;
}
