use std::sync::Arc;

use httpmock::MockServer;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_middleware::WindowedRateLimiter;
use mediasearch_providers::IndexHmacProvider;
use mediasearch_types::{Credentials, ProviderConfig, ProviderName};

fn config_for(server: &MockServer, with_credentials: bool) -> ProviderConfig {
    let mut config = ProviderConfig::disabled(ProviderName::IndexHmac);
    config.enabled = true;
    config.base_url = Some(server.base_url());
    if with_credentials {
        config.credentials = Credentials {
            api_key: Some("key123".to_string()),
            api_secret: Some("secret456".to_string()),
            bearer: None,
        };
    }
    config
}

fn no_quota_limiter() -> Arc<WindowedRateLimiter> {
    Arc::new(WindowedRateLimiter::new(Default::default()))
}

#[tokio::test]
async fn signs_the_request_and_maps_feeds() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/search/byterm")
            .header_exists("X-Auth-Date")
            .header("X-Auth-Key", "key123")
            .header_exists("Authorization");
        then.status(200).json_body(serde_json::json!({
            "feeds": [
                { "id": 100, "title": "Signal Noise", "url": "https://feeds.example/signal.xml", "explicit": false }
            ]
        }));
    });

    let provider = IndexHmacProvider::new(config_for(&server, true), no_quota_limiter());
    let params = SearchParams {
        query: Some("signal".to_string()),
        limit: 10,
        ..Default::default()
    };
    let items = provider.search(&params).await;

    mock.assert();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Signal Noise");
}

#[tokio::test]
async fn missing_credentials_returns_empty_without_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/search/byterm");
        then.status(200).json_body(serde_json::json!({ "feeds": [] }));
    });

    let provider = IndexHmacProvider::new(config_for(&server, false), no_quota_limiter());
    let params = SearchParams {
        query: Some("signal".to_string()),
        ..Default::default()
    };
    let items = provider.search(&params).await;

    assert!(items.is_empty());
    mock.assert_hits(0);
}
