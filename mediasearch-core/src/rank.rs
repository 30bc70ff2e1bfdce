//! Result ordering (§4.5): a three-key stable sort applied after
//! deduplication and before the result limit is applied.

use std::collections::HashMap;

use mediasearch_types::{CaseInsensitiveSetProviders, PodcastItem, ProviderName, StationItem};

/// The fields the ranker needs from an item, independent of whether it's a
/// `StationItem` or a `PodcastItem`.
pub trait Ranked {
    /// Display name used as the final tie-breaker (`name` for stations,
    /// `title` for podcasts).
    fn rank_name(&self) -> &str;
    /// Popularity used as the primary tie-breaker, descending.
    fn rank_popularity(&self) -> u64;
    /// Contributing providers, used to compute the min-priority sort key.
    fn rank_providers(&self) -> &CaseInsensitiveSetProviders;
}

/// Stable three-key sort: ascending min-priority, descending popularity,
/// ascending locale-insensitive name. Each key only breaks ties left by the
/// one before it, and the sort is stable so items already equal on all three
/// keys keep their dedup-stage relative order.
pub struct Ranker;

impl Ranker {
    /// Sort `items` in place according to the three-key rule.
    pub fn rank<T: Ranked>(items: &mut [T], priorities: &HashMap<ProviderName, u32>) {
        items.sort_by(|a, b| {
            let pa = a.rank_providers().min_priority(priorities);
            let pb = b.rank_providers().min_priority(priorities);
            pa.cmp(&pb)
                .then_with(|| b.rank_popularity().cmp(&a.rank_popularity()))
                .then_with(|| {
                    a.rank_name()
                        .to_lowercase()
                        .cmp(&b.rank_name().to_lowercase())
                })
        });
    }
}

impl Ranked for StationItem {
    fn rank_name(&self) -> &str {
        &self.name
    }
    fn rank_popularity(&self) -> u64 {
        self.popularity
    }
    fn rank_providers(&self) -> &CaseInsensitiveSetProviders {
        &self.source_providers
    }
}

impl Ranked for PodcastItem {
    fn rank_name(&self) -> &str {
        &self.title
    }
    fn rank_popularity(&self) -> u64 {
        self.popularity
    }
    fn rank_providers(&self) -> &CaseInsensitiveSetProviders {
        &self.source_providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediasearch_types::CaseInsensitiveSet;

    fn station(name: &str, popularity: u64, provider: ProviderName) -> StationItem {
        StationItem {
            id: name.into(),
            name: name.into(),
            stream_url: format!("http://{name}/stream"),
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
            popularity,
            last_changed: None,
            source: provider,
            source_providers: CaseInsensitiveSetProviders::just(provider),
        }
    }

    #[test]
    fn sorts_by_priority_then_popularity_then_name() {
        let mut priorities = HashMap::new();
        priorities.insert(ProviderName::CommunityRadio, 0);
        priorities.insert(ProviderName::Shoutcast, 1);

        let mut items = vec![
            station("Zed", 100, ProviderName::Shoutcast),
            station("Alpha", 5, ProviderName::CommunityRadio),
            station("Beta", 50, ProviderName::CommunityRadio),
        ];
        Ranker::rank(&mut items, &priorities);
        let names: Vec<_> = items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Zed"]);
    }

    #[test]
    fn equal_keys_break_ties_on_name_case_insensitively() {
        let mut priorities = HashMap::new();
        priorities.insert(ProviderName::CommunityRadio, 0);
        let mut items = vec![
            station("bravo", 1, ProviderName::CommunityRadio),
            station("Alpha", 1, ProviderName::CommunityRadio),
        ];
        Ranker::rank(&mut items, &priorities);
        let names: Vec<_> = items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "bravo"]);
    }
}
