//! mediasearch
//!
//! The federated media directory search engine. `MediaSearchEngine` wires
//! the six provider adapters (`mediasearch-providers`), the shared cache
//! and rate limiter (`mediasearch-middleware`), and the orchestration
//! algorithm (`mediasearch-core`) into the four entry points an HTTP
//! collaborator calls (§6): `search_stations`, `search_podcasts`,
//! `provider_statuses`, `parse_feed`.
#![warn(missing_docs)]

/// Bit-exact cache-key builders.
pub mod cache_key;
/// The fan-out/dedupe/rank/cache pipeline.
pub mod orchestrator;
/// The provider name → instance + config mapping.
pub mod registry;

use std::collections::HashMap;
use std::sync::Arc;

use mediasearch_core::cache::Cache;
use mediasearch_core::error::ProviderError;
use mediasearch_core::feed::FeedParser;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_middleware::cache::MokaCache;
use mediasearch_middleware::quota::WindowedRateLimiter;
use mediasearch_providers::{
    AppleItunesProvider, CommunityRadioProvider, IndexHmacProvider, KeywordDirectoryProvider,
    ShoutcastProvider, TaddyGraphqlProvider,
};
use mediasearch_types::{
    EpisodeItem, PodcastItem, ProviderConfig, ProviderName, RateLimitQuota, SearchLimits,
    StationItem,
};

pub use orchestrator::SearchOrchestrator;
pub use registry::{ProviderRegistry, ProviderStatus};

/// Inputs for `SearchStations` (§6).
#[derive(Debug, Clone)]
pub struct StationSearchRequest {
    /// Free-text query.
    pub query: Option<String>,
    /// Country filter.
    pub country: Option<String>,
    /// Language filter.
    pub language: Option<String>,
    /// Genre/tag filter.
    pub tag: Option<String>,
    /// Requested result limit; `None` uses the configured default, and any
    /// value is clamped into `[1, configured max]` rather than rejected.
    pub limit: Option<u32>,
    /// 1-based page number.
    pub page: u32,
    /// Restrict results to these providers, if non-empty.
    pub provider_filter: Vec<ProviderName>,
    /// Force a fresh fan-out, skipping the cache read (see
    /// `SearchParams::bypass_cache`).
    pub bypass_cache: bool,
}

impl Default for StationSearchRequest {
    fn default() -> Self {
        Self {
            query: None,
            country: None,
            language: None,
            tag: None,
            limit: None,
            page: 1,
            provider_filter: Vec::new(),
            bypass_cache: false,
        }
    }
}

/// Inputs for `SearchPodcasts` (§6). No country or tag filter: the podcast
/// pipeline's three adapters don't expose either as a query facet.
#[derive(Debug, Clone, Default)]
pub struct PodcastSearchRequest {
    /// Free-text query.
    pub query: Option<String>,
    /// Language filter.
    pub language: Option<String>,
    /// Requested result limit; see `StationSearchRequest::limit`.
    pub limit: Option<u32>,
    /// Restrict results to these providers, if non-empty.
    pub provider_filter: Vec<ProviderName>,
    /// Force a fresh fan-out, skipping the cache read.
    pub bypass_cache: bool,
}

/// Output of `SearchStations` (§6). The core has no catalog-wide result
/// count to report — each provider returns at most `limit` items with no
/// total of its own — so `total` and `total_pages` describe this response,
/// not a global count: `total_pages` is a "there may be another page"
/// heuristic, advancing past the requested page only when this page came
/// back full.
#[derive(Debug, Clone)]
pub struct StationSearchResponse {
    /// Ranked, deduplicated, limit-truncated results.
    pub items: Vec<StationItem>,
    /// `items.len()`.
    pub total: usize,
    /// The requested page, or one past it if this page was completely full.
    pub total_pages: u32,
}

/// Wires the six adapters, the shared cache, and the shared rate limiter
/// into the station and podcast search pipelines.
pub struct MediaSearchEngine {
    stations: SearchOrchestrator<StationItem>,
    podcasts: SearchOrchestrator<PodcastItem>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl MediaSearchEngine {
    /// Build the engine from `MEDIASEARCH_<PROVIDER>_*` environment
    /// variables, one shared process-local cache, and one shared
    /// process-local rate limiter.
    #[must_use]
    pub fn from_env() -> Self {
        let configs: HashMap<ProviderName, ProviderConfig> = ProviderName::ALL
            .into_iter()
            .map(|name| (name, ProviderConfig::from_env(name)))
            .collect();
        Self::from_configs(configs)
    }

    /// Build the engine from an explicit configuration map. Providers with
    /// no entry in `configs` fall back to `ProviderConfig::disabled`, logged
    /// at warn, per the registry's missing-configuration rule (§4.2).
    #[must_use]
    pub fn from_configs(configs: HashMap<ProviderName, ProviderConfig>) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(MokaCache::default());
        let quotas: HashMap<ProviderName, RateLimitQuota> = configs
            .iter()
            .filter_map(|(name, c)| c.rate_limit.map(|q| (*name, q)))
            .collect();
        let rate_limiter: Arc<dyn RateLimiter> = Arc::new(WindowedRateLimiter::new(quotas));

        let config_of = |name: ProviderName| {
            configs.get(&name).cloned().unwrap_or_else(|| {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    provider = name.as_str(),
                    "no configuration for known provider, skipping"
                );
                ProviderConfig::disabled(name)
            })
        };

        let community_radio_config = config_of(ProviderName::CommunityRadio);
        let keyword_directory_config = config_of(ProviderName::KeywordDirectory);
        let shoutcast_config = config_of(ProviderName::Shoutcast);
        let apple_itunes_config = config_of(ProviderName::AppleItunes);
        let index_hmac_config = config_of(ProviderName::IndexHmac);
        let taddy_graphql_config = config_of(ProviderName::TaddyGraphql);

        let station_providers: Vec<(Arc<dyn Provider<Item = StationItem>>, ProviderConfig)> = vec![
            (
                Arc::new(CommunityRadioProvider::new(
                    community_radio_config.clone(),
                    Arc::clone(&rate_limiter),
                )) as Arc<dyn Provider<Item = StationItem>>,
                community_radio_config,
            ),
            (
                Arc::new(KeywordDirectoryProvider::new(
                    keyword_directory_config.clone(),
                    Arc::clone(&rate_limiter),
                )) as Arc<dyn Provider<Item = StationItem>>,
                keyword_directory_config,
            ),
            (
                Arc::new(ShoutcastProvider::new(
                    shoutcast_config.clone(),
                    Arc::clone(&rate_limiter),
                )) as Arc<dyn Provider<Item = StationItem>>,
                shoutcast_config,
            ),
        ];

        let podcast_providers: Vec<(Arc<dyn Provider<Item = PodcastItem>>, ProviderConfig)> = vec![
            (
                Arc::new(AppleItunesProvider::new(
                    apple_itunes_config.clone(),
                    Arc::clone(&rate_limiter),
                )) as Arc<dyn Provider<Item = PodcastItem>>,
                apple_itunes_config,
            ),
            (
                Arc::new(IndexHmacProvider::new(
                    index_hmac_config.clone(),
                    Arc::clone(&rate_limiter),
                )) as Arc<dyn Provider<Item = PodcastItem>>,
                index_hmac_config,
            ),
            (
                Arc::new(TaddyGraphqlProvider::new(
                    taddy_graphql_config.clone(),
                    Arc::clone(&rate_limiter),
                )) as Arc<dyn Provider<Item = PodcastItem>>,
                taddy_graphql_config,
            ),
        ];

        Self {
            stations: SearchOrchestrator::new(
                ProviderRegistry::new(station_providers),
                Arc::clone(&cache),
                Arc::clone(&rate_limiter),
                cache_key::for_stations,
            ),
            podcasts: SearchOrchestrator::new(
                ProviderRegistry::new(podcast_providers),
                cache,
                Arc::clone(&rate_limiter),
                cache_key::for_podcasts,
            ),
            rate_limiter,
        }
    }

    /// `SearchStations` (§6): never fails — total upstream failure yields an
    /// empty `items` list, not an error.
    pub async fn search_stations(&self, request: StationSearchRequest) -> StationSearchResponse {
        let limit = SearchLimits::stations().clamp(request.limit);
        let page = request.page.max(1);
        let params = SearchParams {
            query: request.query,
            country: request.country,
            language: request.language,
            tag: request.tag,
            limit,
            page,
            provider_filter: request.provider_filter,
            bypass_cache: request.bypass_cache,
        };
        let items = self.stations.search(params).await;
        let total = items.len();
        let total_pages = if total as u32 == limit { page + 1 } else { page };
        StationSearchResponse {
            items,
            total,
            total_pages,
        }
    }

    /// `SearchPodcasts` (§6): never fails — total upstream failure yields an
    /// empty list, not an error.
    pub async fn search_podcasts(&self, request: PodcastSearchRequest) -> Vec<PodcastItem> {
        let limit = SearchLimits::podcasts().clamp(request.limit);
        let params = SearchParams {
            query: request.query,
            country: None,
            language: request.language,
            tag: None,
            limit,
            page: 1,
            provider_filter: request.provider_filter,
            bypass_cache: request.bypass_cache,
        };
        self.podcasts.search(params).await
    }

    /// `ProviderStatuses` (§6): never fails.
    pub async fn provider_statuses(&self) -> Vec<ProviderStatus> {
        let mut out = Vec::new();
        for name in self.stations.registry().names() {
            out.push(status_for(self.stations.registry(), &self.rate_limiter, name).await);
        }
        for name in self.podcasts.registry().names() {
            out.push(status_for(self.podcasts.registry(), &self.rate_limiter, name).await);
        }
        out.sort_by_key(|s| s.name);
        out
    }

    /// `ParseFeed` (§6): fails with `FeedInvalid` when `xml` is not a
    /// well-formed podcast feed. Stateless; does not touch the cache,
    /// registry, or rate limiter.
    pub fn parse_feed(
        xml: &str,
        feed_url: &str,
    ) -> Result<(PodcastItem, Vec<EpisodeItem>), ProviderError> {
        FeedParser::parse(xml, feed_url)
    }
}

async fn status_for<T>(
    registry: &ProviderRegistry<T>,
    rate_limiter: &Arc<dyn RateLimiter>,
    name: ProviderName,
) -> ProviderStatus {
    let config = registry.config_of(name);
    let stats = rate_limiter.stats_for(name).await;
    ProviderStatus {
        name,
        enabled: config.is_some_and(|c| c.enabled),
        priority: config.map_or(u32::MAX, |c| c.priority),
        #[allow(clippy::cast_possible_truncation)]
        rate_limit: stats.limit.map(|l| l as u32),
        remaining: stats.remaining,
        reset_seconds: stats.seconds_until_reset,
    }
}
