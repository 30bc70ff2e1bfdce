//! Index HMAC adapter (§4.3): a podcast search API authenticated with a
//! date-salted `SHA1(key || secret || unix-seconds)` signature rather than a
//! standard bearer token.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use mediasearch_core::error::ProviderError;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, Explicit, PodcastItem, ProviderConfig,
    ProviderName,
};
use reqwest::Client;
use serde::Deserialize;
use sha1::{Digest, Sha1};
#[cfg(feature = "tracing")]
use tracing::warn;

use crate::http::{build_client, decode_json_response};

const DEFAULT_BASE_URL: &str = "https://api.index-hmac.example";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    feeds: Vec<RawFeed>,
}

#[derive(Debug, Deserialize)]
struct RawFeed {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    episode_count: Option<u32>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    last_update_time: Option<i64>,
    #[serde(default)]
    explicit: Option<bool>,
}

impl RawFeed {
    fn into_item(self) -> PodcastItem {
        let explicit = match self.explicit {
            Some(true) => Explicit::True,
            Some(false) => Explicit::False,
            None => Explicit::Unknown,
        };
        PodcastItem {
            id: self.id.to_string(),
            title: self.title,
            author: self.author,
            description: self.description,
            artwork_url: self.image,
            feed_url: self.url,
            itunes_id: None,
            categories: CaseInsensitiveSet::from_iter_strs(self.categories),
            episode_count: self.episode_count,
            language: self.language,
            website_url: None,
            last_updated: self.last_update_time.map(|secs| secs * 1000),
            explicit,
            popularity: 0,
            source: ProviderName::IndexHmac,
            source_providers: CaseInsensitiveSetProviders::just(ProviderName::IndexHmac),
        }
    }
}

/// Podcast search adapter authenticated with a per-request SHA1 signature.
pub struct IndexHmacProvider {
    client: Client,
    config: ProviderConfig,
    base_url: String,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl IndexHmacProvider {
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

    fn signature(key: &str, secret: &str, unix_seconds: u64) -> String {
        let mut hasher = Sha1::new();
        hasher.update(key.as_bytes());
        hasher.update(secret.as_bytes());
        hasher.update(unix_seconds.to_string().as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[async_trait]
impl Provider for IndexHmacProvider {
    type Item = PodcastItem;

    fn name(&self) -> ProviderName {
        ProviderName::IndexHmac
    }

    fn requires_auth(&self) -> bool {
        true
    }

    fn is_available(&self) -> bool {
        self.config.enabled && !self.config.credentials.is_empty()
    }

    async fn search(&self, params: &SearchParams) -> Vec<Self::Item> {
        let Some(term) = params.query_str() else {
            return Vec::new();
        };
        let (Some(key), Some(secret)) = (
            self.config.credentials.api_key.as_deref(),
            self.config.credentials.api_secret.as_deref(),
        ) else {
            #[cfg(feature = "tracing")]
            warn!(
                error = %ProviderError::ProviderAuthMissing { provider: "index_hmac" },
                "skipping search"
            );
            return Vec::new();
        };

        let unix_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let signature = Self::signature(key, secret, unix_seconds);

        let url = format!("{}/search/byterm", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", term), ("max", &params.limit.to_string())])
            .header("X-Auth-Date", unix_seconds.to_string())
            .header("X-Auth-Key", key)
            .header("Authorization", signature)
            .send()
            .await;
        self.rate_limiter.record(ProviderName::IndexHmac).await;

        decode_json_response::<SearchResponse>(response, "index_hmac")
            .await
            .map(|body| body.feeds.into_iter().map(RawFeed::into_item).collect())
            .unwrap_or_default()
    }
}
