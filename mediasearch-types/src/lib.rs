//! mediasearch-types
//!
//! Shared data transfer objects for the mediasearch ecosystem: the canonical
//! station/podcast/episode records, the provider identity enum, and the
//! immutable per-provider configuration loaded at startup.
//!
//! - `items`: `StationItem`, `PodcastItem`, `EpisodeItem`, `ProviderName`, `MediaKind`.
//! - `config`: `ProviderConfig`, `Credentials`, `SearchLimits`, environment loading.
#![warn(missing_docs)]

pub mod config;
pub mod items;

pub use config::{Credentials, ProviderConfig, RateLimitQuota, SearchLimits};
pub use items::{
    CaseInsensitiveSet, CaseInsensitiveSetProviders, EpisodeItem, Explicit, Identifiable,
    MediaKind, PodcastItem, ProviderName, StationItem, normalize_url_identity,
};
