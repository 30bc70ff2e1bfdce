use mediasearch_core::Deduper;
use mediasearch_types::{CaseInsensitiveSet, CaseInsensitiveSetProviders, ProviderName, StationItem};
use proptest::prelude::*;

fn arb_provider() -> impl Strategy<Value = ProviderName> {
    prop_oneof![
        Just(ProviderName::CommunityRadio),
        Just(ProviderName::KeywordDirectory),
        Just(ProviderName::Shoutcast),
    ]
}

fn arb_station(stream_hosts: usize) -> impl Strategy<Value = StationItem> {
    (
        0..stream_hosts,
        "[a-zA-Z ]{1,12}",
        1u64..1000,
        arb_provider(),
    )
        .prop_map(|(host, name, votes, provider)| StationItem {
            id: format!("{host}-{provider}"),
            name,
            stream_url: format!("http://host{host}.example.com/stream"),
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
            source: provider,
            source_providers: CaseInsensitiveSetProviders::just(provider),
        })
}

proptest! {
    #[test]
    fn merged_output_never_exceeds_distinct_stream_urls(
        stations in proptest::collection::vec(arb_station(5), 0..40)
    ) {
        let distinct_hosts: std::collections::HashSet<_> =
            stations.iter().map(|s| s.stream_url.clone()).collect();
        let merged = Deduper::merge(stations);
        prop_assert!(merged.len() <= distinct_hosts.len());
    }

    #[test]
    fn merged_popularity_equals_sum_of_inputs_sharing_a_stream_url(
        stations in proptest::collection::vec(arb_station(3), 0..40)
    ) {
        let mut expected: std::collections::HashMap<String, u64> = std::collections::HashMap::new();
        for s in &stations {
            *expected.entry(s.stream_url.clone()).or_insert(0) += s.popularity;
        }
        let merged = Deduper::merge(stations);
        for item in &merged {
            prop_assert_eq!(item.popularity, expected[&item.stream_url]);
        }
    }

    #[test]
    fn every_merged_item_includes_its_own_source_in_provenance(
        stations in proptest::collection::vec(arb_station(4), 1..20)
    ) {
        let merged = Deduper::merge(stations);
        for item in &merged {
            prop_assert!(item.source_providers.contains(item.source));
        }
    }
}
