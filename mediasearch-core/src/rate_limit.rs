//! `RateLimiter` contract (§4.6): a per-provider windowed counter with a
//! two-phase admit/record protocol. The concrete process-local
//! implementation lives in `mediasearch-middleware`; this trait is the
//! "pluggable storage backing" boundary the spec calls for.

use async_trait::async_trait;
use mediasearch_types::ProviderName;

/// Point-in-time usage snapshot for a single provider, as read by the
/// `ProviderStatuses` status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageStats {
    /// Units consumed in the current window.
    pub used: u64,
    /// Configured quota limit, if any.
    pub limit: Option<u64>,
    /// Units remaining in the current window (`limit - used`, saturating).
    pub remaining: Option<u64>,
    /// Seconds until the current window resets.
    pub seconds_until_reset: u64,
}

/// Per-provider windowed admission control.
///
/// `admit` and `record` are intentionally separate: the orchestrator calls
/// `admit` before invoking a provider, and the provider adapter itself calls
/// `record` immediately after issuing the upstream request (whether or not a
/// response arrives), so usage is billed against the attempt, not the
/// outcome.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Returns `true` if `provider` is currently under quota (or has no
    /// quota configured). Does not itself increment any counter. If the
    /// window has expired, implementations reset the counter and anchor a
    /// new window at the current instant as a side effect of this call.
    async fn admit(&self, provider: ProviderName) -> bool;

    /// Record one unit of usage against `provider`'s current window. A
    /// no-op for providers without a configured quota.
    async fn record(&self, provider: ProviderName);

    /// Current usage snapshot for `provider`.
    async fn stats_for(&self, provider: ProviderName) -> UsageStats;
}
