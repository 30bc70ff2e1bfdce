//! Windowed rate limiter (§4.6): one fixed-size counting window per
//! provider, anchored once when it opens and reset only when a call to
//! [`admit`](RateLimiter::admit) observes that it has elapsed — not on every
//! [`record`](RateLimiter::record), which would let a steady trickle of
//! calls keep sliding the window open indefinitely.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mediasearch_core::rate_limit::{RateLimiter, UsageStats};
use mediasearch_types::{ProviderName, RateLimitQuota};

struct Window {
    count: u64,
    started_at: Instant,
}

impl Window {
    fn new() -> Self {
        Self {
            count: 0,
            started_at: Instant::now(),
        }
    }
}

/// Process-local, per-provider windowed rate limiter.
///
/// Providers with no configured quota are always admitted and never
/// tracked. This is the shipped implementation of the `RateLimiter` trait
/// boundary in `mediasearch-core`; a distributed deployment can swap in a
/// different backend (Redis, a shared counter service) behind the same
/// trait without touching the orchestrator.
pub struct WindowedRateLimiter {
    quotas: HashMap<ProviderName, RateLimitQuota>,
    windows: Mutex<HashMap<ProviderName, Window>>,
}

impl WindowedRateLimiter {
    /// Build a limiter from each provider's configured quota. Providers
    /// absent from `quotas` are never rate limited.
    #[must_use]
    pub fn new(quotas: HashMap<ProviderName, RateLimitQuota>) -> Self {
        Self {
            quotas,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn quota_for(&self, provider: ProviderName) -> Option<&RateLimitQuota> {
        self.quotas.get(&provider)
    }
}

#[async_trait]
impl RateLimiter for WindowedRateLimiter {
    async fn admit(&self, provider: ProviderName) -> bool {
        let Some(quota) = self.quota_for(provider) else {
            return true;
        };
        let mut windows = self.windows.lock().expect("mutex poisoned");
        let window = windows.entry(provider).or_insert_with(Window::new);
        if window.started_at.elapsed() >= quota.period {
            window.count = 0;
            window.started_at = Instant::now();
        }
        window.count < u64::from(quota.limit)
    }

    async fn record(&self, provider: ProviderName) {
        if self.quota_for(provider).is_none() {
            return;
        }
        let mut windows = self.windows.lock().expect("mutex poisoned");
        let window = windows.entry(provider).or_insert_with(Window::new);
        window.count = window.count.saturating_add(1);
    }

    async fn stats_for(&self, provider: ProviderName) -> UsageStats {
        let Some(quota) = self.quota_for(provider) else {
            return UsageStats {
                used: 0,
                limit: None,
                remaining: None,
                seconds_until_reset: 0,
            };
        };
        let windows = self.windows.lock().expect("mutex poisoned");
        let (used, elapsed) = windows
            .get(&provider)
            .map_or((0, Duration::ZERO), |w| (w.count, w.started_at.elapsed()));
        let limit = u64::from(quota.limit);
        UsageStats {
            used,
            limit: Some(limit),
            remaining: Some(limit.saturating_sub(used)),
            seconds_until_reset: quota.period.saturating_sub(elapsed).as_secs(),
        }
    }
}
