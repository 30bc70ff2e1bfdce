use std::sync::Arc;

use httpmock::MockServer;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_middleware::WindowedRateLimiter;
use mediasearch_providers::TaddyGraphqlProvider;
use mediasearch_types::{Credentials, ProviderConfig, ProviderName};

fn config_for(server: &MockServer, with_bearer: bool) -> ProviderConfig {
    let mut config = ProviderConfig::disabled(ProviderName::TaddyGraphql);
    config.enabled = true;
    config.base_url = Some(server.base_url());
    if with_bearer {
        config.credentials = Credentials {
            api_key: None,
            api_secret: None,
            bearer: Some("tok-abc".to_string()),
        };
    }
    config
}

fn no_quota_limiter() -> Arc<WindowedRateLimiter> {
    Arc::new(WindowedRateLimiter::new(Default::default()))
}

#[tokio::test]
async fn posts_a_graphql_document_with_bearer_auth() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .header("Authorization", "Bearer tok-abc")
            .json_body_partial(r#"{"variables": {"term": "history", "limit": 5}}"#);
        then.status(200).json_body(serde_json::json!({
            "data": {
                "searchForTerm": {
                    "podcastSeries": [
                        {
                            "uuid": "s-1",
                            "name": "Hardcore History",
                            "author": { "name": "Dan" },
                            "isExplicitContent": true
                        }
                    ]
                }
            }
        }));
    });

    let provider = TaddyGraphqlProvider::new(config_for(&server, true), no_quota_limiter());
    let params = SearchParams {
        query: Some("history".to_string()),
        limit: 5,
        ..Default::default()
    };
    let items = provider.search(&params).await;

    mock.assert();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].author.as_deref(), Some("Dan"));
}

#[tokio::test]
async fn missing_bearer_token_returns_empty_without_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST);
        then.status(200).json_body(serde_json::json!({ "data": null }));
    });

    let provider = TaddyGraphqlProvider::new(config_for(&server, false), no_quota_limiter());
    let params = SearchParams {
        query: Some("history".to_string()),
        ..Default::default()
    };
    let items = provider.search(&params).await;

    assert!(items.is_empty());
    mock.assert_hits(0);
}
