//! End-to-end orchestrator scenarios, built from `mediasearch-mock`'s
//! scripted providers and fixtures instead of any real upstream.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_middleware::cache::MokaCache;
use mediasearch_middleware::quota::WindowedRateLimiter;
use mediasearch_mock::fixtures::{podcasts, stations};
use mediasearch_mock::{MockBehavior, ScriptedProvider};
use mediasearch_types::{Credentials, PodcastItem, ProviderConfig, ProviderName, RateLimitQuota, StationItem};

use mediasearch::orchestrator::SearchOrchestrator;
use mediasearch::registry::ProviderRegistry;
use mediasearch::cache_key;

fn config(name: ProviderName, priority: u32) -> ProviderConfig {
    ProviderConfig {
        name,
        enabled: true,
        priority,
        timeout: Duration::from_secs(5),
        cache_ttl: Duration::from_secs(60),
        rate_limit: None,
        credentials: Credentials::default(),
        base_url: None,
    }
}

fn station_orchestrator(
    providers: Vec<(Arc<dyn Provider<Item = StationItem>>, ProviderConfig)>,
    rate_limiter: Arc<dyn mediasearch_core::rate_limit::RateLimiter>,
) -> SearchOrchestrator<StationItem> {
    SearchOrchestrator::new(
        ProviderRegistry::new(providers),
        Arc::new(MokaCache::default()),
        rate_limiter,
        cache_key::for_stations,
    )
}

fn podcast_orchestrator(
    providers: Vec<(Arc<dyn Provider<Item = PodcastItem>>, ProviderConfig)>,
    rate_limiter: Arc<dyn mediasearch_core::rate_limit::RateLimiter>,
) -> SearchOrchestrator<PodcastItem> {
    SearchOrchestrator::new(
        ProviderRegistry::new(providers),
        Arc::new(MokaCache::default()),
        rate_limiter,
        cache_key::for_podcasts,
    )
}

fn no_quota() -> Arc<dyn mediasearch_core::rate_limit::RateLimiter> {
    Arc::new(WindowedRateLimiter::new(HashMap::new()))
}

/// Scenario 1: two providers, one duplicate.
#[tokio::test]
async fn two_providers_one_duplicate_merges_votes_and_prefers_higher_priority_name() {
    let (a, b) = stations::bbc_world_duplicate();
    let provider_a = ScriptedProvider::returning(ProviderName::CommunityRadio, vec![a]);
    let provider_b = ScriptedProvider::returning(ProviderName::KeywordDirectory, vec![b]);

    let orchestrator = station_orchestrator(
        vec![
            (
                Arc::new(provider_a) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::CommunityRadio, 1),
            ),
            (
                Arc::new(provider_b) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::KeywordDirectory, 2),
            ),
        ],
        no_quota(),
    );

    let params = SearchParams {
        query: Some("bbc".to_string()),
        limit: 20,
        ..Default::default()
    };
    let results = orchestrator.search(params).await;

    assert_eq!(results.len(), 1);
    let item = &results[0];
    assert_eq!(item.name, "BBC World");
    assert_eq!(item.popularity, 15);
    assert_eq!(item.source, ProviderName::CommunityRadio);
    assert!(item.source_providers.contains(ProviderName::CommunityRadio));
    assert!(item.source_providers.contains(ProviderName::KeywordDirectory));
}

/// Scenario 2: provider failure isolation.
#[tokio::test]
async fn failing_provider_is_isolated_and_the_healthy_provider_still_returns_its_items() {
    let failing = ScriptedProvider::<StationItem>::new(ProviderName::CommunityRadio, MockBehavior::Empty);
    let healthy = ScriptedProvider::returning(
        ProviderName::KeywordDirectory,
        stations::three_distinct_stations(ProviderName::KeywordDirectory),
    );

    let orchestrator = station_orchestrator(
        vec![
            (
                Arc::new(failing) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::CommunityRadio, 1),
            ),
            (
                Arc::new(healthy) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::KeywordDirectory, 2),
            ),
        ],
        no_quota(),
    );

    let params = SearchParams {
        query: Some("anything".to_string()),
        limit: 20,
        ..Default::default()
    };
    let results = orchestrator.search(params).await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.source == ProviderName::KeywordDirectory));
}

/// Scenario 3: rate-limit cutoff. Quota = 2 per 60 seconds for one
/// provider; a second, unlimited provider is unaffected.
#[tokio::test]
async fn third_identical_query_gets_no_upstream_call_for_the_rate_limited_provider() {
    let limited = ScriptedProvider::returning(
        ProviderName::CommunityRadio,
        stations::single_station(ProviderName::CommunityRadio),
    );
    let unlimited = ScriptedProvider::returning(
        ProviderName::KeywordDirectory,
        stations::single_station(ProviderName::KeywordDirectory),
    );

    let mut quotas = HashMap::new();
    quotas.insert(
        ProviderName::CommunityRadio,
        RateLimitQuota {
            limit: 2,
            period: Duration::from_secs(60),
        },
    );
    let rate_limiter: Arc<dyn mediasearch_core::rate_limit::RateLimiter> =
        Arc::new(WindowedRateLimiter::new(quotas));

    let limited_provider = Arc::new(limited);
    let orchestrator = station_orchestrator(
        vec![
            (
                Arc::clone(&limited_provider) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::CommunityRadio, 1),
            ),
            (
                Arc::new(unlimited) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::KeywordDirectory, 2),
            ),
        ],
        rate_limiter,
    );

    let params = SearchParams {
        query: Some("solo".to_string()),
        limit: 20,
        bypass_cache: true,
        ..Default::default()
    };

    let first = orchestrator.search(params.clone()).await;
    let second = orchestrator.search(params.clone()).await;
    let third = orchestrator.search(params).await;

    assert!(first.iter().any(|s| s.source == ProviderName::CommunityRadio));
    assert!(second.iter().any(|s| s.source == ProviderName::CommunityRadio));
    assert!(!third.iter().any(|s| s.source == ProviderName::CommunityRadio));
    assert!(third.iter().any(|s| s.source == ProviderName::KeywordDirectory));
    assert_eq!(limited_provider.call_count(), 2);
}

/// Scenario 4: cache hit. Identical queries with caching enabled issue one
/// upstream call total.
#[tokio::test]
async fn identical_query_within_ttl_issues_no_second_upstream_call() {
    let provider = ScriptedProvider::returning(
        ProviderName::CommunityRadio,
        stations::single_station(ProviderName::CommunityRadio),
    );
    let provider = Arc::new(provider);

    let orchestrator = station_orchestrator(
        vec![(
            Arc::clone(&provider) as Arc<dyn Provider<Item = StationItem>>,
            config(ProviderName::CommunityRadio, 1),
        )],
        no_quota(),
    );

    let params = SearchParams {
        query: Some("solo".to_string()),
        limit: 20,
        ..Default::default()
    };

    let first = orchestrator.search(params.clone()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = orchestrator.search(params).await;

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

/// Scenario 5: atomic-field precedence on podcast merge.
#[tokio::test]
async fn higher_priority_podcast_title_wins_while_longer_description_and_ids_survive() {
    let (a, b) = podcasts::daily_news_atomic_precedence();
    let provider_a = ScriptedProvider::returning(ProviderName::AppleItunes, vec![a]);
    let provider_b = ScriptedProvider::returning(ProviderName::IndexHmac, vec![b]);

    let orchestrator = podcast_orchestrator(
        vec![
            (
                Arc::new(provider_a) as Arc<dyn Provider<Item = PodcastItem>>,
                config(ProviderName::AppleItunes, 1),
            ),
            (
                Arc::new(provider_b) as Arc<dyn Provider<Item = PodcastItem>>,
                config(ProviderName::IndexHmac, 2),
            ),
        ],
        no_quota(),
    );

    let params = SearchParams {
        query: Some("daily news".to_string()),
        limit: 20,
        ..Default::default()
    };
    let results = orchestrator.search(params).await;

    assert_eq!(results.len(), 1);
    let item = &results[0];
    assert_eq!(item.title, "Daily News");
    assert_eq!(
        item.description,
        "long detailed description with more content"
    );
    assert_eq!(item.feed_url.as_deref(), Some("https://f"));
    assert_eq!(item.itunes_id.as_deref(), Some("42"));
    assert!(item.source_providers.contains(ProviderName::AppleItunes));
    assert!(item.source_providers.contains(ProviderName::IndexHmac));
}

/// Boundary: a zero-provider configuration logs a warning and returns
/// empty rather than failing.
#[tokio::test]
async fn zero_enabled_providers_yields_empty_without_panicking() {
    let orchestrator: SearchOrchestrator<StationItem> = station_orchestrator(Vec::new(), no_quota());
    let params = SearchParams {
        query: Some("anything".to_string()),
        limit: 20,
        ..Default::default()
    };
    assert!(orchestrator.search(params).await.is_empty());
}

/// Boundary: a provider filter restricts results to the intersecting
/// providers even when others would otherwise contribute.
#[tokio::test]
async fn provider_filter_excludes_non_matching_providers() {
    let a = ScriptedProvider::returning(
        ProviderName::CommunityRadio,
        stations::single_station(ProviderName::CommunityRadio),
    );
    let b = ScriptedProvider::returning(
        ProviderName::KeywordDirectory,
        stations::single_station(ProviderName::KeywordDirectory),
    );

    let orchestrator = station_orchestrator(
        vec![
            (
                Arc::new(a) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::CommunityRadio, 1),
            ),
            (
                Arc::new(b) as Arc<dyn Provider<Item = StationItem>>,
                config(ProviderName::KeywordDirectory, 2),
            ),
        ],
        no_quota(),
    );

    let params = SearchParams {
        query: Some("solo".to_string()),
        limit: 20,
        provider_filter: vec![ProviderName::CommunityRadio],
        ..Default::default()
    };
    let results = orchestrator.search(params).await;

    assert!(results.iter().all(|r| r.source == ProviderName::CommunityRadio));
}
