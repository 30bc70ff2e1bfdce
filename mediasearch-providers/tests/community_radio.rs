use std::sync::Arc;

use httpmock::MockServer;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_middleware::WindowedRateLimiter;
use mediasearch_providers::CommunityRadioProvider;
use mediasearch_types::ProviderConfig;
use mediasearch_types::ProviderName;

fn config_for(server: &MockServer) -> ProviderConfig {
    let mut config = ProviderConfig::disabled(ProviderName::CommunityRadio);
    config.enabled = true;
    config.base_url = Some(server.base_url());
    config
}

fn no_quota_limiter() -> Arc<WindowedRateLimiter> {
    Arc::new(WindowedRateLimiter::new(Default::default()))
}

#[tokio::test]
async fn returns_stations_with_ssl_upgraded_stream_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/json/stations/search");
        then.status(200).json_body(serde_json::json!([
            {
                "stationuuid": "abc-123",
                "name": "Night Drive",
                "url": "http://stream.example/night",
                "url_resolved": "",
                "ssl_capable": true,
                "tags": "synthwave, chill",
                "votes": 10,
                "clickcount": 5
            }
        ]));
    });

    let provider = CommunityRadioProvider::new(config_for(&server), no_quota_limiter());
    let params = SearchParams {
        query: Some("night".to_string()),
        limit: 20,
        ..Default::default()
    };
    let items = provider.search(&params).await;

    mock.assert();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].stream_url, "https://stream.example/night");
    assert_eq!(items[0].popularity, 15);
    assert!(items[0].tags.iter().any(|t| t == "chill"));
}

#[tokio::test]
async fn stations_without_any_stream_url_are_dropped() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/json/stations/search");
        then.status(200).json_body(serde_json::json!([
            { "stationuuid": "no-url", "name": "Ghost Station", "url": "", "url_resolved": "" }
        ]));
    });

    let provider = CommunityRadioProvider::new(config_for(&server), no_quota_limiter());
    let items = provider.search(&SearchParams::default()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn unreachable_host_yields_empty_results_not_a_panic() {
    let mut config = ProviderConfig::disabled(ProviderName::CommunityRadio);
    config.enabled = true;
    config.base_url = Some("http://127.0.0.1:1".to_string());

    let provider = CommunityRadioProvider::new(config, no_quota_limiter());
    let items = provider.search(&SearchParams::default()).await;
    assert!(items.is_empty());
}
