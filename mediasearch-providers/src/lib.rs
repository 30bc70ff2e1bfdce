//! mediasearch-providers
//!
//! Concrete `Provider` adapters for the six upstream search APIs (§4.3):
//! three station directories (`community_radio`, `keyword_directory`,
//! `shoutcast`) and three podcast directories (`apple_itunes`, `index_hmac`,
//! `taddy_graphql`). Each adapter owns its own `reqwest::Client` and an
//! `Arc<dyn RateLimiter>`, and never surfaces upstream errors: failures are
//! logged and mapped to an empty result, per the `Provider` contract.
#![warn(missing_docs)]

/// Shared `reqwest::Client` construction (product user agent, per-provider
/// timeout).
pub mod http;
/// Lenient numeric deserializers for upstream APIs that mix numeric types
/// across response versions.
pub mod serde_helpers;

/// Apple iTunes podcast search adapter.
pub mod apple_itunes;
/// Community Radio Directory station search adapter.
pub mod community_radio;
/// Index HMAC podcast search adapter.
pub mod index_hmac;
/// Keyword Directory station search adapter.
pub mod keyword_directory;
/// Shoutcast-style station search adapter.
pub mod shoutcast;
/// Taddy-style GraphQL podcast search adapter.
pub mod taddy_graphql;

pub use apple_itunes::AppleItunesProvider;
pub use community_radio::CommunityRadioProvider;
pub use index_hmac::IndexHmacProvider;
pub use keyword_directory::KeywordDirectoryProvider;
pub use shoutcast::ShoutcastProvider;
pub use taddy_graphql::TaddyGraphqlProvider;
