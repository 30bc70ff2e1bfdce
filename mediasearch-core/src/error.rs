//! Error taxonomy for the mediasearch engine.
//!
//! Provider-level errors never propagate out of the orchestrator: a
//! `Provider::search` call has an infallible `Vec<Item>` return, so most of
//! these variants exist for logging and for the one operation that *does*
//! surface an error to its caller, [`ProviderError::FeedInvalid`] via
//! `FeedParser::parse`.

use thiserror::Error;

/// Error kinds produced while serving a search or parsing a feed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// Upstream refused connection, timed out, or returned 5xx.
    #[error("{provider} unavailable: {detail}")]
    ProviderUnavailable {
        /// Provider that failed.
        provider: &'static str,
        /// Human-readable detail.
        detail: String,
    },

    /// Credentials required by the provider are absent.
    #[error("{provider} missing required credentials")]
    ProviderAuthMissing {
        /// Provider missing credentials.
        provider: &'static str,
    },

    /// Quota exhausted; no request was issued.
    #[error("{provider} rate limited")]
    ProviderRateLimited {
        /// Provider that is rate limited.
        provider: &'static str,
    },

    /// Upstream returned a 2xx response with an unparseable body.
    #[error("{provider} returned malformed data: {sample}")]
    ProviderMalformed {
        /// Provider that returned malformed data.
        provider: &'static str,
        /// A truncated sample of the offending body (at most 200 bytes).
        sample: String,
    },

    /// The fed document was not a well-formed podcast feed.
    #[error("feed invalid: {0}")]
    FeedInvalid(String),

    /// The cache backing store failed; always swallowed by callers (treated
    /// as a miss on read, a no-op on write). The shipped `MokaCache` backing
    /// is in-process and cannot fail, so this variant is never constructed
    /// by it; it exists for a pluggable remote-kv backing to report a
    /// failure through the same `Cache` trait without changing its
    /// infallible signature (see `mediasearch-core::cache`).
    #[error("cache backend error: {0}")]
    CacheError(String),

    /// A per-provider call exceeded its configured deadline, or the caller
    /// dropped the search future outright. Constructed by
    /// `SearchOrchestrator::search` when a provider call times out; a
    /// caller-initiated drop never constructs it (nothing runs after the
    /// future is dropped to construct anything).
    #[error("cancelled by caller")]
    CancelledByCaller,
}

impl ProviderError {
    /// Truncate `body` to at most 200 bytes (on a char boundary) for use as
    /// a `ProviderMalformed` sample.
    #[must_use]
    pub fn truncated_sample(body: &str) -> String {
        const MAX: usize = 200;
        if body.len() <= MAX {
            return body.to_string();
        }
        let mut end = MAX;
        while end > 0 && !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}
