//! Deterministic station fixtures for the orchestrator end-to-end scenarios.

use mediasearch_types::{CaseInsensitiveSet, CaseInsensitiveSetProviders, ProviderName, StationItem};

fn station(
    id: &str,
    name: &str,
    stream_url: &str,
    votes: u64,
    source: ProviderName,
) -> StationItem {
    StationItem {
        id: id.to_string(),
        name: name.to_string(),
        stream_url: stream_url.to_string(),
        homepage_url: None,
        country: None,
        country_code: None,
        state: None,
        city: None,
        language: None,
        tags: CaseInsensitiveSet::default(),
        bitrate_kbps: 0,
        codec: None,
        logo_url: None,
        popularity: votes,
        last_changed: None,
        source,
        source_providers: CaseInsensitiveSetProviders::just(source),
    }
}

/// Scenario 1: two providers report the same stream under slightly
/// different names, one with a trailing slash. Provider A is
/// higher-priority and should win the atomic `name` field; `popularity`
/// should sum to 15.
#[must_use]
pub fn bbc_world_duplicate() -> (StationItem, StationItem) {
    let a = station(
        "a1",
        "BBC World",
        "http://x/stream",
        10,
        ProviderName::CommunityRadio,
    );
    let b = station(
        "b7",
        "BBC WORLD SERVICE",
        "http://x/stream/",
        5,
        ProviderName::KeywordDirectory,
    );
    (a, b)
}

/// Scenario 2: three unrelated stations from a single healthy provider,
/// used alongside a provider configured to fail/hang to prove isolation.
#[must_use]
pub fn three_distinct_stations(source: ProviderName) -> Vec<StationItem> {
    vec![
        station("s1", "Jazz Cafe", "http://a.example/1", 1, source),
        station("s2", "Morning Talk", "http://a.example/2", 2, source),
        station("s3", "Deep House", "http://a.example/3", 3, source),
    ]
}

/// A single station from `source`, used for rate-limit-cutoff and cache-hit
/// scenarios where the exact identity doesn't matter, only call counting.
#[must_use]
pub fn single_station(source: ProviderName) -> Vec<StationItem> {
    vec![station("one", "Solo Station", "http://solo.example/1", 1, source)]
}
