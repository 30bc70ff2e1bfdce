//! mediasearch-middleware
//!
//! Concrete `Cache` and `RateLimiter` implementations used by the
//! orchestrator. The trait boundaries themselves live in `mediasearch-core`;
//! this crate supplies the process-local backing the shipped engine uses.
//!
//! - `cache`: `MokaCache`, a `moka`-backed TTL cache with per-entry TTL.
//! - `quota`: `WindowedRateLimiter`, a per-provider fixed-window counter.
#![warn(missing_docs)]

/// `moka`-backed TTL cache.
pub mod cache;
/// Per-provider windowed rate limiter.
pub mod quota;

pub use cache::MokaCache;
pub use quota::WindowedRateLimiter;
