//! Shoutcast-style adapter (§4.3): a single free-text search endpoint with
//! no structured facets, so every filter is folded into one query string.

use std::sync::Arc;

use async_trait::async_trait;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, ProviderConfig, ProviderName, StationItem,
};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{build_client, decode_json_response};
use crate::serde_helpers::de_u64_lenient;

const DEFAULT_BASE_URL: &str = "https://yp.shoutcast-style.example";

#[derive(Debug, Deserialize)]
struct RawStation {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(default, rename = "URL")]
    url: Option<String>,
    #[serde(default, rename = "Genre")]
    genre: String,
    #[serde(default, rename = "Bitrate", deserialize_with = "de_u64_lenient")]
    bitrate: u64,
    #[serde(default, rename = "Listeners", deserialize_with = "de_u64_lenient")]
    listeners: u64,
}

impl RawStation {
    fn into_item(self, base_url: &str) -> StationItem {
        let stream_url = self
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("{base_url}/tune-in/{}", self.id));
        let tags = CaseInsensitiveSet::from_iter_strs(
            self.genre.split(',').map(str::trim).filter(|s| !s.is_empty()),
        );
        StationItem {
            id: self.id.to_string(),
            name: self.name,
            stream_url,
            homepage_url: None,
            country: None,
            country_code: None,
            state: None,
            city: None,
            language: None,
            tags,
            bitrate_kbps: self.bitrate as u32,
            codec: None,
            logo_url: None,
            popularity: self.listeners,
            last_changed: None,
            source: ProviderName::Shoutcast,
            source_providers: CaseInsensitiveSetProviders::just(ProviderName::Shoutcast),
        }
    }
}

/// Station search adapter over a single free-text query endpoint.
pub struct ShoutcastProvider {
    client: Client,
    config: ProviderConfig,
    base_url: String,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl ShoutcastProvider {
    /// Build the adapter from its configuration.
    #[must_use]
    pub fn new(config: ProviderConfig, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = build_client(config.timeout);
        Self {
            client,
            config,
            base_url,
            rate_limiter,
        }
    }
}

#[async_trait]
impl Provider for ShoutcastProvider {
    type Item = StationItem;

    fn name(&self) -> ProviderName {
        ProviderName::Shoutcast
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        self.config.enabled
    }

    async fn search(&self, params: &SearchParams) -> Vec<Self::Item> {
        let fragments: Vec<&str> = [
            params.query_str(),
            params.tag.as_deref(),
            params.country.as_deref(),
            params.language.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        let query = fragments.join(" | ");
        if query.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/Search/UpdateSearch", self.base_url);
        let response = self.client.get(&url).query(&[("query", &query)]).send().await;
        self.rate_limiter.record(ProviderName::Shoutcast).await;
        decode_json_response::<Vec<RawStation>>(response, "shoutcast")
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|raw| raw.into_item(&self.base_url))
            .collect()
    }
}
