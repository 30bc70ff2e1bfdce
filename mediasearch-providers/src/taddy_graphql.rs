//! Taddy GraphQL adapter (§4.3): a single bearer-authenticated GraphQL
//! endpoint with one fixed query document.

use std::sync::Arc;

use async_trait::async_trait;
use mediasearch_core::error::ProviderError;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, Explicit, PodcastItem, ProviderConfig,
    ProviderName,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::warn;

use crate::http::{build_client, decode_json_response};

const DEFAULT_BASE_URL: &str = "https://api.taddy-style.example/graphql";

const SEARCH_QUERY: &str = r"
query SearchForTerm($term: String!, $limit: Int!) {
  searchForTerm(term: $term, limitPerPage: $limit) {
    podcastSeries {
      uuid
      name
      author { name }
      description
      imageUrl
      rssUrl
      itunesId
      genres
      totalEpisodesCount
      language
      websiteUrl
      datePublished
      isExplicitContent
    }
  }
}
";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: GraphQlVariables<'a>,
}

#[derive(Debug, Serialize)]
struct GraphQlVariables<'a> {
    term: &'a str,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<GraphQlData>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    #[serde(rename = "searchForTerm")]
    search_for_term: SearchForTerm,
}

#[derive(Debug, Deserialize)]
struct SearchForTerm {
    #[serde(default, rename = "podcastSeries")]
    podcast_series: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    uuid: String,
    name: String,
    #[serde(default)]
    author: Option<RawAuthor>,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "imageUrl")]
    image_url: Option<String>,
    #[serde(default, rename = "rssUrl")]
    rss_url: Option<String>,
    #[serde(default, rename = "itunesId")]
    itunes_id: Option<i64>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default, rename = "totalEpisodesCount")]
    total_episodes_count: Option<u32>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default, rename = "websiteUrl")]
    website_url: Option<String>,
    #[serde(default, rename = "datePublished")]
    date_published: Option<i64>,
    #[serde(default, rename = "isExplicitContent")]
    is_explicit_content: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    name: String,
}

impl RawSeries {
    fn into_item(self) -> PodcastItem {
        let explicit = match self.is_explicit_content {
            Some(true) => Explicit::True,
            Some(false) => Explicit::False,
            None => Explicit::Unknown,
        };
        PodcastItem {
            id: self.uuid,
            title: self.name,
            author: self.author.map(|a| a.name),
            description: self.description,
            artwork_url: self.image_url,
            feed_url: self.rss_url,
            itunes_id: self.itunes_id.map(|id| id.to_string()),
            categories: CaseInsensitiveSet::from_iter_strs(self.genres),
            episode_count: self.total_episodes_count,
            language: self.language,
            website_url: self.website_url,
            last_updated: self.date_published.map(|secs| secs * 1000),
            explicit,
            popularity: 0,
            source: ProviderName::TaddyGraphql,
            source_providers: CaseInsensitiveSetProviders::just(ProviderName::TaddyGraphql),
        }
    }
}

/// Podcast search adapter over a bearer-authenticated GraphQL endpoint.
pub struct TaddyGraphqlProvider {
    client: Client,
    config: ProviderConfig,
    base_url: String,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl TaddyGraphqlProvider {
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
impl Provider for TaddyGraphqlProvider {
    type Item = PodcastItem;

    fn name(&self) -> ProviderName {
        ProviderName::TaddyGraphql
    }

    fn requires_auth(&self) -> bool {
        true
    }

    fn is_available(&self) -> bool {
        self.config.enabled && self.config.credentials.bearer.is_some()
    }

    async fn search(&self, params: &SearchParams) -> Vec<Self::Item> {
        let Some(term) = params.query_str() else {
            return Vec::new();
        };
        let Some(bearer) = self.config.credentials.bearer.as_deref() else {
            #[cfg(feature = "tracing")]
            warn!(
                error = %ProviderError::ProviderAuthMissing { provider: "taddy_graphql" },
                "skipping search"
            );
            return Vec::new();
        };

        let body = GraphQlRequest {
            query: SEARCH_QUERY,
            variables: GraphQlVariables {
                term,
                limit: params.limit,
            },
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await;
        self.rate_limiter.record(ProviderName::TaddyGraphql).await;

        let Some(body) = decode_json_response::<GraphQlResponse>(response, "taddy_graphql").await
        else {
            return Vec::new();
        };
        let Some(data) = body.data else {
            #[cfg(feature = "tracing")]
            warn!(
                error = %ProviderError::ProviderMalformed {
                    provider: "taddy_graphql",
                    sample: "response carried no data field".to_string(),
                },
                "taddy-graphql query returned no data"
            );
            return Vec::new();
        };
        data.search_for_term
            .podcast_series
            .into_iter()
            .map(RawSeries::into_item)
            .collect()
    }
}
