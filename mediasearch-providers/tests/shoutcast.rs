use std::sync::Arc;

use httpmock::MockServer;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_middleware::WindowedRateLimiter;
use mediasearch_providers::ShoutcastProvider;
use mediasearch_types::ProviderConfig;
use mediasearch_types::ProviderName;

fn config_for(server: &MockServer) -> ProviderConfig {
    let mut config = ProviderConfig::disabled(ProviderName::Shoutcast);
    config.enabled = true;
    config.base_url = Some(server.base_url());
    config
}

fn no_quota_limiter() -> Arc<WindowedRateLimiter> {
    Arc::new(WindowedRateLimiter::new(Default::default()))
}

#[tokio::test]
async fn all_filters_are_joined_into_one_free_text_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/Search/UpdateSearch")
            .query_param("query", "synthwave | retro | us | english");
        then.status(200).json_body(serde_json::json!([
            { "ID": 7, "Name": "Retro Wave", "URL": "http://a.example/7", "Genre": "synth,retro", "Bitrate": 128, "Listeners": 42 }
        ]));
    });

    let provider = ShoutcastProvider::new(config_for(&server), no_quota_limiter());
    let params = SearchParams {
        query: Some("synthwave".to_string()),
        tag: Some("retro".to_string()),
        country: Some("us".to_string()),
        language: Some("english".to_string()),
        ..Default::default()
    };
    let items = provider.search(&params).await;

    mock.assert();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].popularity, 42);
}

#[tokio::test]
async fn station_missing_url_falls_back_to_id_based_stream_url() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/Search/UpdateSearch");
        then.status(200).json_body(serde_json::json!([
            { "ID": 3, "Name": "No Direct URL", "Bitrate": "64", "Listeners": "9" }
        ]));
    });

    let provider = ShoutcastProvider::new(config_for(&server), no_quota_limiter());
    let params = SearchParams {
        query: Some("x".to_string()),
        ..Default::default()
    };
    let items = provider.search(&params).await;

    assert_eq!(items.len(), 1);
    assert!(items[0].stream_url.ends_with("/tune-in/3"));
    assert_eq!(items[0].bitrate_kbps, 64);
}

#[tokio::test]
async fn empty_query_and_no_other_filters_skips_the_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/Search/UpdateSearch");
        then.status(200).json_body(serde_json::json!([]));
    });

    let provider = ShoutcastProvider::new(config_for(&server), no_quota_limiter());
    let items = provider.search(&SearchParams::default()).await;

    assert!(items.is_empty());
    mock.assert_hits(0);
}
