//! Community Radio Directory adapter (§4.3): a `radio-browser.info`-shaped
//! station search API, reachable through a rotating set of mirror hosts.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mediasearch_core::error::ProviderError;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_core::rate_limit::RateLimiter;
use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, ProviderConfig, ProviderName, StationItem,
};
use reqwest::Client;
use serde::Deserialize;
#[cfg(feature = "tracing")]
use tracing::{info, warn};

use crate::http::build_client;
use crate::serde_helpers::{de_u32_lenient, de_u64_lenient};

/// Default mirror hosts tried in order until one succeeds.
const DEFAULT_HOSTS: &[&str] = &[
    "https://de1.community-radio.example",
    "https://de2.community-radio.example",
    "https://at1.community-radio.example",
];

#[derive(Debug, Deserialize)]
struct RawStation {
    stationuuid: String,
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    url_resolved: String,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    countrycode: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    tags: String,
    #[serde(default, deserialize_with = "de_u32_lenient")]
    bitrate: u32,
    #[serde(default)]
    codec: Option<String>,
    #[serde(default)]
    favicon: Option<String>,
    #[serde(default, deserialize_with = "de_u64_lenient")]
    votes: u64,
    #[serde(default, deserialize_with = "de_u64_lenient")]
    clickcount: u64,
    #[serde(default)]
    ssl_capable: bool,
    #[serde(default)]
    lastchangetime_unix_ms: Option<i64>,
}

impl RawStation {
    fn into_item(self) -> Option<StationItem> {
        let mut stream_url = if self.url_resolved.is_empty() {
            self.url
        } else {
            self.url_resolved
        };
        if stream_url.is_empty() {
            return None;
        }
        if self.ssl_capable && stream_url.starts_with("http://") {
            stream_url = format!("https://{}", &stream_url["http://".len()..]);
        }

        let tags = CaseInsensitiveSet::from_iter_strs(
            self.tags.split(',').map(str::trim).filter(|s| !s.is_empty()),
        );

        Some(StationItem {
            id: self.stationuuid,
            name: self.name,
            stream_url,
            homepage_url: self.homepage,
            country: self.country,
            country_code: self.countrycode,
            state: self.state,
            city: None,
            language: self.language,
            tags,
            bitrate_kbps: self.bitrate,
            codec: self.codec,
            logo_url: self.favicon,
            popularity: self.votes.saturating_add(self.clickcount),
            last_changed: self.lastchangetime_unix_ms,
            source: ProviderName::CommunityRadio,
            source_providers: CaseInsensitiveSetProviders::just(ProviderName::CommunityRadio),
        })
    }
}

/// Station search adapter with rotating-mirror fallback.
pub struct CommunityRadioProvider {
    client: Client,
    config: ProviderConfig,
    hosts: Mutex<Vec<String>>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl CommunityRadioProvider {
    /// Build the adapter from its configuration. If `config.base_url` is
    /// set, it becomes the sole host; otherwise the built-in mirror list is
    /// used.
    #[must_use]
    pub fn new(config: ProviderConfig, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        let hosts = config
            .base_url
            .clone()
            .map(|url| vec![url])
            .unwrap_or_else(|| DEFAULT_HOSTS.iter().map(|s| s.to_string()).collect());
        let client = build_client(config.timeout);
        Self {
            client,
            config,
            hosts: Mutex::new(hosts),
            rate_limiter,
        }
    }

    fn hosts_snapshot(&self) -> Vec<String> {
        self.hosts.lock().expect("mutex poisoned").clone()
    }

    fn promote(&self, host: &str) {
        let mut hosts = self.hosts.lock().expect("mutex poisoned");
        if let Some(pos) = hosts.iter().position(|h| h == host) {
            if pos != 0 {
                let promoted = hosts.remove(pos);
                #[cfg(feature = "tracing")]
                info!(host = %promoted, "promoted community-radio mirror");
                hosts.insert(0, promoted);
            }
        }
    }
}

#[async_trait]
impl Provider for CommunityRadioProvider {
    type Item = StationItem;

    fn name(&self) -> ProviderName {
        ProviderName::CommunityRadio
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        self.config.enabled
    }

    async fn search(&self, params: &SearchParams) -> Vec<Self::Item> {
        let hosts = self.hosts_snapshot();
        for host in hosts {
            let url = format!("{host}/json/stations/search");
            let mut query: Vec<(&str, String)> = vec![
                ("limit", params.limit.to_string()),
                ("order", "votes".to_string()),
                ("reverse", "true".to_string()),
            ];
            if let Some(q) = params.query_str() {
                query.push(("name", q.to_string()));
            }
            if let Some(country) = &params.country {
                query.push(("country", country.clone()));
            }
            if let Some(language) = &params.language {
                query.push(("language", language.clone()));
            }
            if let Some(tag) = &params.tag {
                query.push(("tag", tag.clone()));
            }

            let response = self.client.get(&url).query(&query).send().await;
            self.rate_limiter.record(ProviderName::CommunityRadio).await;
            let resp = match response {
                Ok(resp) => resp,
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    warn!(
                        host = %host,
                        error = %ProviderError::ProviderUnavailable {
                            provider: "community_radio",
                            detail: _err.to_string(),
                        },
                        "community-radio mirror unreachable, trying next"
                    );
                    continue;
                }
            };
            if !resp.status().is_success() {
                let _status = resp.status();
                #[cfg(feature = "tracing")]
                warn!(
                    host = %host,
                    error = %ProviderError::ProviderUnavailable {
                        provider: "community_radio",
                        detail: format!("http {_status}"),
                    },
                    "community-radio mirror unreachable, trying next"
                );
                continue;
            }
            let body = match resp.text().await {
                Ok(body) => body,
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    warn!(
                        host = %host,
                        error = %ProviderError::ProviderUnavailable {
                            provider: "community_radio",
                            detail: _err.to_string(),
                        },
                        "community-radio mirror unreachable, trying next"
                    );
                    continue;
                }
            };
            match serde_json::from_str::<Vec<RawStation>>(&body) {
                Ok(raw) => {
                    self.promote(&host);
                    return raw.into_iter().filter_map(RawStation::into_item).collect();
                }
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    warn!(
                        host = %host,
                        error = %ProviderError::ProviderMalformed {
                            provider: "community_radio",
                            sample: ProviderError::truncated_sample(&body),
                        },
                        "community-radio returned malformed body"
                    );
                    continue;
                }
            }
        }
        Vec::new()
    }
}
