//! Identity resolution and metadata merge (§4.4).
//!
//! Two canonical item types share one merge engine via the [`Mergeable`]
//! trait: each type supplies its own identity keys (in descending
//! confidence) and its own field-level merge rule; the engine itself only
//! handles bucketing by key and preserving first-seen order for the
//! ranker's later stable sort.

use std::collections::HashMap;

use mediasearch_types::{Explicit, PodcastItem, ProviderName, StationItem, normalize_url_identity};

/// A type the deduper can merge duplicates of.
///
/// `identity_keys` returns zero or more namespaced candidate keys in
/// descending confidence order. An item with no keys at all (e.g. a station
/// with an empty stream URL) cannot be deduplicated and is dropped — it
/// "cannot play" per the invariant in §3.
pub trait Mergeable: Sized {
    /// Namespaced candidate identity keys, highest confidence first.
    fn identity_keys(&self) -> Vec<String>;

    /// Fold `incoming`'s fields into `self`, which is the item already
    /// present in the canonical list (earlier in provider-priority order).
    fn merge_from(&mut self, incoming: Self);

    /// Ensure `sourceProviders ⊇ {source}`, per the invariant in §3. The
    /// orchestrator calls this on every item straight off the fan-out,
    /// before deduplication, so adapters don't each have to remember it.
    fn stamp_provenance(&mut self);
}

impl Mergeable for StationItem {
    fn identity_keys(&self) -> Vec<String> {
        self.identity_key()
            .map(|k| vec![format!("stream:{k}")])
            .unwrap_or_default()
    }

    fn merge_from(&mut self, incoming: Self) {
        if self.name.is_empty() {
            self.name = incoming.name;
        }
        self.homepage_url = self.homepage_url.take().or(incoming.homepage_url);
        self.country = self.country.take().or(incoming.country);
        self.country_code = self.country_code.take().or(incoming.country_code);
        self.state = self.state.take().or(incoming.state);
        self.city = self.city.take().or(incoming.city);
        self.language = self.language.take().or(incoming.language);
        self.codec = self.codec.take().or(incoming.codec);
        self.logo_url = self.logo_url.take().or(incoming.logo_url);
        if self.bitrate_kbps == 0 {
            self.bitrate_kbps = incoming.bitrate_kbps;
        }
        self.last_changed = self.last_changed.take().or(incoming.last_changed);
        self.tags = std::mem::take(&mut self.tags).union(&incoming.tags);
        self.popularity = self.popularity.saturating_add(incoming.popularity);
        self.source_providers = std::mem::take(&mut self.source_providers)
            .union(&incoming.source_providers);
        self.source_providers.ensure(incoming.source);
    }

    fn stamp_provenance(&mut self) {
        let source = self.source;
        self.source_providers.ensure(source);
    }
}

impl Mergeable for PodcastItem {
    fn identity_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(feed) = self.feed_url.as_deref().and_then(normalize_url_identity) {
            keys.push(format!("feed:{feed}"));
        }
        if let Some(id) = &self.itunes_id {
            keys.push(format!("itunes:{}", id.to_lowercase()));
        }
        keys.push(format!("title:{}", self.title_author_key()));
        keys
    }

    fn merge_from(&mut self, incoming: Self) {
        if self.title.is_empty() {
            self.title = incoming.title;
        }
        if incoming.description.len() > self.description.len() {
            self.description = incoming.description;
        }
        self.author = self.author.take().or(incoming.author);
        self.artwork_url = self.artwork_url.take().or(incoming.artwork_url);
        self.feed_url = self.feed_url.take().or(incoming.feed_url);
        self.itunes_id = self.itunes_id.take().or(incoming.itunes_id);
        self.episode_count = self.episode_count.take().or(incoming.episode_count);
        self.language = self.language.take().or(incoming.language);
        self.website_url = self.website_url.take().or(incoming.website_url);
        self.last_updated = self.last_updated.take().or(incoming.last_updated);
        self.categories = std::mem::take(&mut self.categories).union(&incoming.categories);
        self.popularity = self.popularity.saturating_add(incoming.popularity);
        self.explicit = Explicit::merge(self.explicit, incoming.explicit);
        self.source_providers = std::mem::take(&mut self.source_providers)
            .union(&incoming.source_providers);
        self.source_providers.ensure(incoming.source);
    }

    fn stamp_provenance(&mut self) {
        let source = self.source;
        self.source_providers.ensure(source);
    }
}

/// Merges a flat list of candidate items, fed in provider-priority order,
/// into a canonical de-duplicated list in first-seen order.
pub struct Deduper;

impl Deduper {
    /// Merge `items`. Items whose `identity_keys()` is empty are dropped.
    /// When an incoming item's keys match more than one existing bucket
    /// (e.g. a podcast that arrives with both a feed URL a previous item
    /// registered and a new title-author key), all matching buckets are
    /// folded into the first one found, keeping merges consistent even when
    /// an item is identifiable multiple ways.
    #[must_use]
    pub fn merge<T: Mergeable>(items: Vec<T>) -> Vec<T> {
        let mut canonical: Vec<Option<T>> = Vec::new();
        let mut key_to_index: HashMap<String, usize> = HashMap::new();

        for item in items {
            let keys = item.identity_keys();
            if keys.is_empty() {
                continue;
            }

            let mut target_index = None;
            for key in &keys {
                if let Some(&idx) = key_to_index.get(key) {
                    target_index = Some(idx);
                    break;
                }
            }

            match target_index {
                Some(idx) => {
                    let existing = canonical[idx].take().expect("bucket occupied");
                    let mut merged = existing;
                    merged.merge_from(item);
                    for key in merged.identity_keys() {
                        key_to_index.entry(key).or_insert(idx);
                    }
                    canonical[idx] = Some(merged);
                }
                None => {
                    let idx = canonical.len();
                    for key in &keys {
                        key_to_index.entry(key.clone()).or_insert(idx);
                    }
                    canonical.push(Some(item));
                }
            }
        }

        canonical.into_iter().flatten().collect()
    }
}

/// Minimum configured priority among an item's contributing providers.
#[must_use]
pub fn min_priority(
    providers: &mediasearch_types::CaseInsensitiveSetProviders,
    priorities: &HashMap<ProviderName, u32>,
) -> u32 {
    providers.min_priority(priorities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediasearch_types::{CaseInsensitiveSet, CaseInsensitiveSetProviders};

    fn station(id: &str, name: &str, stream_url: &str, votes: u64, source: ProviderName) -> StationItem {
        StationItem {
            id: id.into(),
            name: name.into(),
            stream_url: stream_url.into(),
            homepage_url: None,
            country: None,
            country_code: None,
            state: None,
            city: None,
            language: None,
            tags: CaseInsensitiveSet::new(),
            bitrate_kbps: 0,
            codec: None,
            logo_url: None,
            popularity: votes,
            last_changed: None,
            source,
            source_providers: CaseInsensitiveSetProviders::just(source),
        }
    }

    #[test]
    fn duplicate_stations_merge_votes_and_prefer_first_name() {
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
        let merged = Deduper::merge(vec![a, b]);
        assert_eq!(merged.len(), 1);
        let item = &merged[0];
        assert_eq!(item.name, "BBC World");
        assert_eq!(item.popularity, 15);
        assert!(item.source_providers.contains(ProviderName::CommunityRadio));
        assert!(item.source_providers.contains(ProviderName::KeywordDirectory));
        assert_eq!(item.source, ProviderName::CommunityRadio);
    }

    #[test]
    fn station_without_stream_url_is_dropped() {
        let a = station("a1", "X", "", 1, ProviderName::CommunityRadio);
        assert!(Deduper::merge(vec![a]).is_empty());
    }

    #[test]
    fn already_unique_list_is_identity() {
        let a = station("a1", "A", "http://a/stream", 1, ProviderName::CommunityRadio);
        let b = station("b1", "B", "http://b/stream", 2, ProviderName::CommunityRadio);
        let merged = Deduper::merge(vec![a.clone(), b.clone()]);
        assert_eq!(merged, vec![a, b]);
    }
}
