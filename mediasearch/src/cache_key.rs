//! Bit-exact cache-key format (§6):
//! `'<namespace>:<query>:<filter1>:<filter2>:…:<limit>:<providersCSV>'`.
//! Missing filters encode as `'all'` or `'any'`; provider CSV is sorted
//! ascending.

use mediasearch_core::provider::SearchParams;
use mediasearch_types::{MediaKind, ProviderName};

fn normalize(value: Option<&str>, missing: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| missing.to_string(), str::to_lowercase)
}

fn providers_csv(filter: &[ProviderName]) -> String {
    if filter.is_empty() {
        return "any".to_string();
    }
    let mut names: Vec<&str> = filter.iter().map(ProviderName::as_str).collect();
    names.sort_unstable();
    names.join(",")
}

/// Build the station-search cache key.
#[must_use]
pub fn for_stations(params: &SearchParams) -> String {
    format!(
        "{}:{}:{}:{}:{}:{}:{}",
        MediaKind::Station.cache_namespace(),
        normalize(params.query.as_deref(), "all"),
        normalize(params.country.as_deref(), "all"),
        normalize(params.language.as_deref(), "all"),
        normalize(params.tag.as_deref(), "all"),
        params.limit,
        providers_csv(&params.provider_filter),
    )
}

/// Build the podcast-search cache key (no `country` or `tag` filter, per
/// §4.1's filter set for podcasts — `PodcastSearchRequest` carries neither).
#[must_use]
pub fn for_podcasts(params: &SearchParams) -> String {
    format!(
        "{}:{}:{}:{}:{}",
        MediaKind::Podcast.cache_namespace(),
        normalize(params.query.as_deref(), "all"),
        normalize(params.language.as_deref(), "all"),
        params.limit,
        providers_csv(&params.provider_filter),
    )
}
