//! Deterministic podcast fixtures for the orchestrator end-to-end scenarios.

use mediasearch_types::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, Explicit, PodcastItem, ProviderName,
};

fn podcast(id: &str, title: &str, description: &str, source: ProviderName) -> PodcastItem {
    PodcastItem {
        id: id.to_string(),
        title: title.to_string(),
        author: None,
        description: description.to_string(),
        artwork_url: None,
        feed_url: None,
        itunes_id: None,
        categories: CaseInsensitiveSet::default(),
        episode_count: None,
        language: None,
        website_url: None,
        last_updated: None,
        explicit: Explicit::Unknown,
        popularity: 0,
        source,
        source_providers: CaseInsensitiveSetProviders::just(source),
    }
}

/// Scenario 5: atomic-field precedence. Provider A (higher priority)
/// contributes a short description and no feed metadata; provider B
/// contributes a longer description plus `feedUrl`/`itunesId`. They match
/// via the `title+author` fallback identity key: same title once
/// lowercased and whitespace-collapsed, same (absent) author.
#[must_use]
pub fn daily_news_atomic_precedence() -> (PodcastItem, PodcastItem) {
    let a = podcast(
        "a-news",
        "Daily News",
        "short",
        ProviderName::AppleItunes,
    );
    let mut b = podcast(
        "b-news",
        "  DAILY   NEWS  ",
        "long detailed description with more content",
        ProviderName::IndexHmac,
    );
    b.feed_url = Some("https://f".to_string());
    b.itunes_id = Some("42".to_string());
    (a, b)
}
