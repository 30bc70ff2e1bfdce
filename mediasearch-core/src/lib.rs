//! mediasearch-core
//!
//! Core traits and algorithms shared across the mediasearch ecosystem.
//!
//! - `provider`: the `Provider` trait every adapter implements, generic over
//!   its item type so the same machinery serves stations and podcasts.
//! - `dedup`: identity resolution and field-level merge for duplicate items.
//! - `rank`: the three-key stable sort applied after deduplication.
//! - `feed`: podcast RSS feed parsing.
//! - `rate_limit`: the `RateLimiter` contract (concrete impl in `mediasearch-middleware`).
//! - `cache`: the `Cache` contract (concrete impl in `mediasearch-middleware`).
//! - `error`: the shared provider/feed error type.
#![warn(missing_docs)]

/// Raw and typed TTL cache contract.
pub mod cache;
/// Identity resolution and metadata merge.
pub mod dedup;
/// Shared error taxonomy.
pub mod error;
/// Podcast RSS feed parsing.
pub mod feed;
/// The uniform provider contract and search parameters.
pub mod provider;
/// Result ordering.
pub mod rank;
/// Per-provider windowed admission control contract.
pub mod rate_limit;

pub use cache::{Cache, TypedCacheExt};
pub use dedup::{Deduper, Mergeable};
pub use error::ProviderError;
pub use feed::FeedParser;
pub use provider::{Provider, SearchParams};
pub use rank::{Ranked, Ranker};
pub use rate_limit::{RateLimiter, UsageStats};
