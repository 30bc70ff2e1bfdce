//! Apple iTunes adapter (§4.3): an unauthenticated podcast search endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, Explicit, PodcastItem, ProviderConfig,
    ProviderName,
};
use reqwest::Client;
use serde::Deserialize;

use crate::http::{build_client, decode_json_response};

const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawPodcast>,
}

#[derive(Debug, Deserialize)]
struct RawPodcast {
    #[serde(rename = "trackId")]
    track_id: i64,
    #[serde(rename = "collectionName")]
    collection_name: String,
    #[serde(default, rename = "artistName")]
    artist_name: Option<String>,
    #[serde(default, rename = "feedUrl")]
    feed_url: Option<String>,
    #[serde(default, rename = "artworkUrl600")]
    artwork_url_600: Option<String>,
    #[serde(default, rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
    #[serde(default, rename = "genres")]
    genres: Vec<String>,
    #[serde(default, rename = "trackCount")]
    track_count: Option<u32>,
    #[serde(default, rename = "collectionExplicitness")]
    collection_explicitness: Option<String>,
    #[serde(default, rename = "collectionViewUrl")]
    collection_view_url: Option<String>,
}

impl RawPodcast {
    fn into_item(self) -> PodcastItem {
        let artwork_url = self.artwork_url_600.or(self.artwork_url_100);
        let explicit = match self.collection_explicitness.as_deref() {
            Some("explicit") => Explicit::True,
            Some("cleaned") | Some("notExplicit") => Explicit::False,
            _ => Explicit::Unknown,
        };
        PodcastItem {
            id: self.track_id.to_string(),
            title: self.collection_name,
            author: self.artist_name,
            description: String::new(),
            artwork_url,
            feed_url: self.feed_url,
            itunes_id: Some(self.track_id.to_string()),
            categories: CaseInsensitiveSet::from_iter_strs(self.genres),
            episode_count: self.track_count,
            language: None,
            website_url: self.collection_view_url,
            last_updated: None,
            explicit,
            popularity: 0,
            source: ProviderName::AppleItunes,
            source_providers: CaseInsensitiveSetProviders::just(ProviderName::AppleItunes),
        }
    }
}

/// Podcast search adapter over the Apple iTunes search API.
pub struct AppleItunesProvider {
    client: Client,
    config: ProviderConfig,
    base_url: String,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl AppleItunesProvider {
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
impl Provider for AppleItunesProvider {
    type Item = PodcastItem;

    fn name(&self) -> ProviderName {
        ProviderName::AppleItunes
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        self.config.enabled
    }

    async fn search(&self, params: &SearchParams) -> Vec<Self::Item> {
        let Some(term) = params.query_str() else {
            return Vec::new();
        };
        let url = format!("{}/search", self.base_url);
        let mut query = vec![
            ("media", "podcast".to_string()),
            ("term", term.to_string()),
            ("limit", params.limit.to_string()),
        ];
        if let Some(language) = &params.language {
            query.push(("lang", language.clone()));
        }

        let response = self.client.get(&url).query(&query).send().await;
        self.rate_limiter.record(ProviderName::AppleItunes).await;
        decode_json_response::<SearchResponse>(response, "apple_itunes")
            .await
            .map(|body| body.results.into_iter().map(RawPodcast::into_item).collect())
            .unwrap_or_default()
    }
}
