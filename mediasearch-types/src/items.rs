//! Canonical item types returned by the search engine.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two parallel search pipelines (stations or podcasts) a
/// config, provider, or cache namespace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Radio station search.
    Station,
    /// Podcast search.
    Podcast,
}

impl MediaKind {
    /// Cache-key namespace for this kind, per the bit-exact format in the spec.
    #[must_use]
    pub const fn cache_namespace(self) -> &'static str {
        match self {
            Self::Station => "radio-search",
            Self::Podcast => "podcasts:multi",
        }
    }
}

/// Stable identifier for a third-party catalog provider.
///
/// A closed, serializable enum rather than an open string: the spec fixes
/// the provider set at six concrete adapters, and a closed variant avoids
/// open-world reflection in the registry, ranker, and rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProviderName {
    /// Community Radio Directory adapter (radio-browser.info shape).
    CommunityRadio,
    /// Keyword Directory adapter (stations-by-keyword / stations-by-country).
    KeywordDirectory,
    /// Shoutcast-style adapter.
    Shoutcast,
    /// Apple iTunes podcast search adapter.
    AppleItunes,
    /// Index HMAC podcast adapter (SHA1-signed requests).
    IndexHmac,
    /// Taddy-style GraphQL podcast adapter.
    TaddyGraphql,
    /// Content parsed directly from a feed URL by `FeedParser::parse`
    /// rather than returned by a search adapter. Deliberately excluded from
    /// [`Self::ALL`]: it is not a configurable upstream and never appears in
    /// a `ProviderConfig` map, a rate limiter, or provider-status reporting.
    DirectFeed,
}

impl ProviderName {
    /// All known *search-adapter* provider names, in declaration order.
    /// [`Self::DirectFeed`] is not a search adapter and is intentionally
    /// absent here — it never gets a `ProviderConfig`, so it always falls
    /// back to worst-priority wherever a priority lookup is done.
    pub const ALL: [Self; 6] = [
        Self::CommunityRadio,
        Self::KeywordDirectory,
        Self::Shoutcast,
        Self::AppleItunes,
        Self::IndexHmac,
        Self::TaddyGraphql,
    ];

    /// Stable kebab-case wire identifier, used in cache keys and env var names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommunityRadio => "community-radio",
            Self::KeywordDirectory => "keyword-directory",
            Self::Shoutcast => "shoutcast",
            Self::AppleItunes => "apple-itunes",
            Self::IndexHmac => "index-hmac",
            Self::TaddyGraphql => "taddy-graphql",
            Self::DirectFeed => "direct-feed",
        }
    }

    /// The media kind this provider answers searches for.
    #[must_use]
    pub const fn kind(self) -> MediaKind {
        match self {
            Self::CommunityRadio | Self::KeywordDirectory | Self::Shoutcast => MediaKind::Station,
            Self::AppleItunes | Self::IndexHmac | Self::TaddyGraphql | Self::DirectFeed => {
                MediaKind::Podcast
            }
        }
    }

    /// Upper-snake-case fragment used to build `MEDIASEARCH_<PROVIDER>_<FIELD>`
    /// environment variable names. Never actually used to build an env var
    /// name for [`Self::DirectFeed`], since it's excluded from [`Self::ALL`]
    /// and `ProviderConfig::from_env` only iterates that list; kept here so
    /// this match stays exhaustive.
    #[must_use]
    pub const fn env_fragment(self) -> &'static str {
        match self {
            Self::CommunityRadio => "COMMUNITY_RADIO",
            Self::KeywordDirectory => "KEYWORD_DIRECTORY",
            Self::Shoutcast => "SHOUTCAST",
            Self::AppleItunes => "APPLE_ITUNES",
            Self::IndexHmac => "INDEX_HMAC",
            Self::TaddyGraphql => "TADDY_GRAPHQL",
            Self::DirectFeed => "DIRECT_FEED",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state explicit-content flag for podcasts: the upstream may not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Explicit {
    /// Upstream did not report an explicit-content flag.
    #[default]
    Unknown,
    /// Upstream reported the podcast as not explicit.
    False,
    /// Upstream reported the podcast as explicit.
    True,
}

impl Explicit {
    /// Merge rule from the dedup spec: prefer non-unknown; if both known and
    /// disagree, OR into `true` (conservative).
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown, x) | (x, Self::Unknown) => x,
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
        }
    }
}

/// A case-insensitive-for-comparison, original-case-for-display string set.
///
/// Tag/category sets are unordered, de-duplicated, and compared
/// case-insensitively, but the first-seen casing is what's kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInsensitiveSet {
    /// Display-case values, keyed internally by their lowercase form for dedup.
    values: BTreeSet<String>,
}

impl CaseInsensitiveSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from an iterator of raw strings, splitting none of them
    /// (callers split comma-separated upstream fields before calling this).
    pub fn from_iter_strs<I: IntoIterator<Item = S>, S: Into<String>>(iter: I) -> Self {
        let mut set = Self::new();
        for s in iter {
            set.insert(s.into());
        }
        set
    }

    /// Insert a value; a case-insensitive duplicate is dropped, keeping the
    /// first-seen casing.
    pub fn insert(&mut self, value: String) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        let lower = trimmed.to_lowercase();
        if !self.values.iter().any(|v| v.to_lowercase() == lower) {
            self.values.insert(trimmed.to_string());
        }
    }

    /// Set-union with another set, preserving original case of whichever side
    /// saw each value first (this side wins ties).
    #[must_use]
    pub fn union(mut self, other: &Self) -> Self {
        for v in &other.values {
            self.insert(v.clone());
        }
        self
    }

    /// Iterate display-case values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Number of distinct (case-insensitive) values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Types that participate in deduplication: any canonical item that carries
/// provenance and a provider-scoped catalog id.
pub trait Identifiable {
    /// Opaque, provider-scoped catalog id.
    fn catalog_id(&self) -> &str;
    /// The provider that produced this instance of the item.
    fn source(&self) -> ProviderName;
    /// All providers that have contributed to this item so far.
    fn source_providers(&self) -> &CaseInsensitiveSetProviders;
}

/// Set of contributing provider names. A thin wrapper so call sites read
/// `sourceProviders` the way the spec names it rather than a bare
/// `BTreeSet<ProviderName>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseInsensitiveSetProviders(pub BTreeSet<ProviderName>);

impl CaseInsensitiveSetProviders {
    /// A set containing only `provider`.
    #[must_use]
    pub fn just(provider: ProviderName) -> Self {
        let mut s = BTreeSet::new();
        s.insert(provider);
        Self(s)
    }

    /// Insert a provider, ensuring `provider ∈ sourceProviders` per the
    /// invariant every result item must satisfy.
    pub fn ensure(&mut self, provider: ProviderName) {
        self.0.insert(provider);
    }

    /// Union with another provider set.
    #[must_use]
    pub fn union(mut self, other: &Self) -> Self {
        self.0.extend(other.0.iter().copied());
        self
    }

    /// Whether `provider` is a member.
    #[must_use]
    pub fn contains(&self, provider: ProviderName) -> bool {
        self.0.contains(&provider)
    }

    /// Whether any of `filter` intersects this set.
    #[must_use]
    pub fn intersects(&self, filter: &[ProviderName]) -> bool {
        filter.is_empty() || filter.iter().any(|p| self.0.contains(p))
    }

    /// The minimum configured priority among member providers, given a
    /// priority map; providers missing from the map are treated as lowest
    /// priority (`u32::MAX`).
    #[must_use]
    pub fn min_priority(&self, priorities: &std::collections::HashMap<ProviderName, u32>) -> u32 {
        self.0
            .iter()
            .map(|p| priorities.get(p).copied().unwrap_or(u32::MAX))
            .min()
            .unwrap_or(u32::MAX)
    }
}

/// A single radio station search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationItem {
    /// Opaque, provider-scoped catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Resolvable stream URL. Required and non-empty; items without one are
    /// discarded before deduplication.
    pub stream_url: String,
    /// Homepage URL, if known.
    pub homepage_url: Option<String>,
    /// Country display name.
    pub country: Option<String>,
    /// ISO-3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Language.
    pub language: Option<String>,
    /// Genre tags.
    pub tags: CaseInsensitiveSet,
    /// Bitrate in kbps; `0` if unknown.
    pub bitrate_kbps: u32,
    /// Audio codec, if known.
    pub codec: Option<String>,
    /// Logo URL, if known.
    pub logo_url: Option<String>,
    /// Sum of votes and click-count; non-negative, missing treated as zero.
    pub popularity: u64,
    /// Unix-millis timestamp of the last upstream change, if known.
    pub last_changed: Option<i64>,
    /// Originating provider.
    pub source: ProviderName,
    /// All providers that have contributed to this item.
    pub source_providers: CaseInsensitiveSetProviders,
}

impl Identifiable for StationItem {
    fn catalog_id(&self) -> &str {
        &self.id
    }
    fn source(&self) -> ProviderName {
        self.source
    }
    fn source_providers(&self) -> &CaseInsensitiveSetProviders {
        &self.source_providers
    }
}

impl StationItem {
    /// Normalized stream-url identity key: lowercase, scheme-stripped
    /// `host + path`, trailing slashes removed.
    #[must_use]
    pub fn identity_key(&self) -> Option<String> {
        normalize_url_identity(&self.stream_url)
    }
}

/// A single podcast search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastItem {
    /// Opaque, provider-scoped catalog id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Author/publisher, if known.
    pub author: Option<String>,
    /// Description.
    pub description: String,
    /// Artwork URL, if known.
    pub artwork_url: Option<String>,
    /// RSS feed URL, if known.
    pub feed_url: Option<String>,
    /// iTunes catalog id, if known.
    pub itunes_id: Option<String>,
    /// Category tags.
    pub categories: CaseInsensitiveSet,
    /// Episode count, if known.
    pub episode_count: Option<u32>,
    /// Language, if known.
    pub language: Option<String>,
    /// Website URL, if known.
    pub website_url: Option<String>,
    /// Unix-millis timestamp of the last upstream update, if known.
    pub last_updated: Option<i64>,
    /// Explicit-content flag.
    pub explicit: Explicit,
    /// Popularity, provider-reported or inferred; non-negative.
    pub popularity: u64,
    /// Originating provider.
    pub source: ProviderName,
    /// All providers that have contributed to this item.
    pub source_providers: CaseInsensitiveSetProviders,
}

impl Identifiable for PodcastItem {
    fn catalog_id(&self) -> &str {
        &self.id
    }
    fn source(&self) -> ProviderName {
        self.source
    }
    fn source_providers(&self) -> &CaseInsensitiveSetProviders {
        &self.source_providers
    }
}

impl PodcastItem {
    /// Normalized `title + '-' + author` fallback identity key: lowercased,
    /// whitespace-collapsed, trimmed.
    #[must_use]
    pub fn title_author_key(&self) -> String {
        let author = self.author.as_deref().unwrap_or("");
        let raw = format!("{}-{author}", self.title);
        raw.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
            .trim()
            .to_string()
    }
}

/// An episode parsed from a podcast RSS feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeItem {
    /// Unique id within the feed; falls back to the audio URL if the feed
    /// carries no `<guid>`.
    pub guid: String,
    /// Feed-scoped parent podcast id (the feed URL, since episodes are
    /// parsed standalone and have no catalog-level parent id of their own).
    pub parent_id: String,
    /// Episode title.
    pub title: String,
    /// Episode description.
    pub description: String,
    /// Audio URL; required.
    pub audio_url: String,
    /// Duration in seconds, if parseable.
    pub duration_seconds: Option<u32>,
    /// Artwork URL, defaulting to the parent podcast's artwork.
    pub artwork_url: Option<String>,
    /// Publish timestamp in unix millis, if parseable.
    pub publish_date: Option<i64>,
}

/// Lowercase, scheme-stripped `host + path` with trailing slashes removed —
/// the station identity key and a building block for the podcast feed-url
/// identity key.
#[must_use]
pub fn normalize_url_identity(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    let without_scheme = lower
        .split_once("://")
        .map_or(lower.as_str(), |(_, rest)| rest);
    let stripped = without_scheme.trim_end_matches('/');
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
