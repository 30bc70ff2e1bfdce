//! Keyword Directory adapter (§4.3): a station search API with two
//! query-by-facet endpoints and no server-side language/tag filtering, so
//! those filters are applied in memory after the fetch.

use std::sync::Arc;

use async_trait::async_trait;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, ProviderConfig, ProviderName, StationItem,
};
use reqwest::Client;
use serde::Deserialize;
#[cfg(feature = "tracing")]
use tracing::warn;

use crate::http::{build_client, decode_json_response};

const DEFAULT_BASE_URL: &str = "https://directory.keyword-search.example";

/// Keywords tried when the caller supplied no query/country/tag/language at
/// all, so the upstream (which requires a facet) still returns something.
const FALLBACK_KEYWORDS: &[&str] = &["top", "music"];

#[derive(Debug, Deserialize)]
struct RawStation {
    id: String,
    name: String,
    #[serde(default)]
    stream_url: Option<String>,
    #[serde(default)]
    stream_urls: Vec<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    votes: u64,
}

impl RawStation {
    fn resolved_stream_url(&self) -> String {
        if let Some(url) = &self.stream_url {
            if !url.is_empty() {
                return url.clone();
            }
        }
        if let Some(first) = self.stream_urls.first() {
            if !first.is_empty() {
                return first.clone();
            }
        }
        if !self.id.is_empty() {
            return format!("{DEFAULT_BASE_URL}/stream/{}", self.id);
        }
        String::new()
    }

    fn into_item(self) -> Option<StationItem> {
        let stream_url = self.resolved_stream_url();
        if stream_url.is_empty() {
            return None;
        }
        let tags = CaseInsensitiveSet::from_iter_strs(self.tags.clone());
        Some(StationItem {
            id: self.id,
            name: self.name,
            stream_url,
            homepage_url: None,
            country: self.country,
            country_code: None,
            state: None,
            city: None,
            language: self.language,
            tags,
            bitrate_kbps: 0,
            codec: None,
            logo_url: None,
            popularity: self.votes,
            last_changed: None,
            source: ProviderName::KeywordDirectory,
            source_providers: CaseInsensitiveSetProviders::just(ProviderName::KeywordDirectory),
        })
    }
}

/// Station search adapter combining two by-facet endpoints with an
/// in-memory post-filter.
pub struct KeywordDirectoryProvider {
    client: Client,
    config: ProviderConfig,
    base_url: String,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl KeywordDirectoryProvider {
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

    async fn fetch_by_keyword(&self, keyword: &str) -> Vec<RawStation> {
        let url = format!("{}/search/stationsbykeyword", self.base_url);
        let response = self.client.get(&url).query(&[("keyword", keyword)]).send().await;
        self.rate_limiter.record(ProviderName::KeywordDirectory).await;
        decode_json_response(response, "keyword_directory").await.unwrap_or_default()
    }

    async fn fetch_by_country(&self, country: &str) -> Vec<RawStation> {
        let url = format!("{}/search/stationsbycountry", self.base_url);
        let response = self.client.get(&url).query(&[("country", country)]).send().await;
        self.rate_limiter.record(ProviderName::KeywordDirectory).await;
        decode_json_response(response, "keyword_directory").await.unwrap_or_default()
    }
}

#[async_trait]
impl Provider for KeywordDirectoryProvider {
    type Item = StationItem;

    fn name(&self) -> ProviderName {
        ProviderName::KeywordDirectory
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        self.config.enabled
    }

    async fn search(&self, params: &SearchParams) -> Vec<Self::Item> {
        let mut raw = Vec::new();

        if let Some(country) = &params.country {
            raw.extend(self.fetch_by_country(country).await);
        }

        let keyword = params.query_str().map(str::to_string);
        if let Some(keyword) = keyword {
            raw.extend(self.fetch_by_keyword(&keyword).await);
        } else if raw.is_empty() {
            for fallback in FALLBACK_KEYWORDS {
                raw.extend(self.fetch_by_keyword(fallback).await);
                if !raw.is_empty() {
                    break;
                }
            }
        }

        if raw.is_empty() {
            #[cfg(feature = "tracing")]
            warn!("keyword-directory returned no candidates for this query");
        }

        raw.into_iter()
            .filter_map(RawStation::into_item)
            .filter(|item| matches_language(item, params))
            .filter(|item| matches_tag(item, params))
            .collect()
    }
}

fn matches_language(item: &StationItem, params: &SearchParams) -> bool {
    match (&params.language, &item.language) {
        (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
        (Some(_), None) => false,
        (None, _) => true,
    }
}

fn matches_tag(item: &StationItem, params: &SearchParams) -> bool {
    match &params.tag {
        Some(wanted) => item.tags.iter().any(|t| t.eq_ignore_ascii_case(wanted)),
        None => true,
    }
}
