//! Immutable per-provider configuration, loaded once at startup.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::items::ProviderName;

/// Optional credentials a provider may require.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// API key (community/index-style auth).
    pub api_key: Option<String>,
    /// Shared secret paired with `api_key` (index-HMAC auth).
    pub api_secret: Option<String>,
    /// Bearer token (GraphQL auth).
    pub bearer: Option<String>,
}

impl Credentials {
    /// Whether any credential field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.api_secret.is_none() && self.bearer.is_none()
    }
}

/// Optional rate-limit quota paired with its accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitQuota {
    /// Maximum requests admitted within `period`.
    pub limit: u32,
    /// Accounting window.
    pub period: Duration,
}

/// Immutable, process-lifetime configuration for a single provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider this configuration applies to.
    pub name: ProviderName,
    /// Whether the provider is enabled.
    pub enabled: bool,
    /// Merge-precedence priority; lower sorts earlier.
    pub priority: u32,
    /// Per-call request timeout.
    pub timeout: Duration,
    /// Cache TTL applied to results this provider contributes to.
    pub cache_ttl: Duration,
    /// Optional rate-limit quota.
    pub rate_limit: Option<RateLimitQuota>,
    /// Optional credentials.
    pub credentials: Credentials,
    /// Optional base URL override (defaults are adapter-specific).
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// A disabled default configuration for `name`, used when no environment
    /// configuration is present for a known provider (the registry then logs
    /// a warn and skips it, per spec).
    #[must_use]
    pub fn disabled(name: ProviderName) -> Self {
        Self {
            name,
            enabled: false,
            priority: u32::from(u8::MAX),
            timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(300),
            rate_limit: None,
            credentials: Credentials::default(),
            base_url: None,
        }
    }

    /// Load configuration for `name` from `MEDIASEARCH_<PROVIDER>_*`
    /// environment variables. Unknown variables are ignored; missing
    /// variables fall back to conservative defaults except `enabled`, which
    /// defaults to `false` (a provider must be explicitly opted in).
    #[must_use]
    pub fn from_env(name: ProviderName) -> Self {
        let prefix = format!("MEDIASEARCH_{}", name.env_fragment());
        let enabled = env_bool(&format!("{prefix}_ENABLED"));
        let priority = env::var(format!("{prefix}_PRIORITY"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);
        let timeout = env::var(format!("{prefix}_TIMEOUT_MS"))
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or_else(|| Duration::from_millis(3000), Duration::from_millis);
        let cache_ttl = env::var(format!("{prefix}_CACHE_TTL_MS"))
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or_else(|| Duration::from_secs(300), Duration::from_millis);
        let base_url = env::var(format!("{prefix}_BASE_URL")).ok();
        let api_key = env::var(format!("{prefix}_API_KEY")).ok();
        let api_secret = env::var(format!("{prefix}_API_SECRET")).ok();
        let bearer = env::var(format!("{prefix}_BEARER")).ok();
        let rate_limit_value = env::var(format!("{prefix}_RATE_LIMIT"))
            .ok()
            .and_then(|v| v.parse::<u32>().ok());
        let rate_period_seconds = env::var(format!("{prefix}_RATE_PERIOD_SECONDS"))
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(2_592_000); // 30 days

        let rate_limit = rate_limit_value.map(|limit| RateLimitQuota {
            limit,
            period: Duration::from_secs(rate_period_seconds),
        });

        Self {
            name,
            enabled,
            priority,
            timeout,
            cache_ttl,
            rate_limit,
            credentials: Credentials {
                api_key,
                api_secret,
                bearer,
            },
            base_url,
        }
    }
}

/// `true`/`1` (case-insensitive) parse as true; anything else, including an
/// absent variable, parses as false.
fn env_bool(key: &str) -> bool {
    env::var(key)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(false)
}

/// Per-kind bounds on the requested result `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Default limit when the caller doesn't specify one.
    pub default: u32,
    /// Maximum limit a caller may request; larger values are clamped.
    pub max: u32,
}

impl SearchLimits {
    /// Default bounds for station search: default 20, max 100.
    #[must_use]
    pub const fn stations() -> Self {
        Self {
            default: 20,
            max: 100,
        }
    }

    /// Default bounds for podcast search: default 20, max 50.
    #[must_use]
    pub const fn podcasts() -> Self {
        Self {
            default: 20,
            max: 50,
        }
    }

    /// Clamp a caller-requested limit into `[1, max]`, substituting `default`
    /// when the caller didn't request one.
    #[must_use]
    pub const fn clamp(self, requested: Option<u32>) -> u32 {
        match requested {
            None => self.default,
            Some(0) => 1,
            Some(n) if n > self.max => self.max,
            Some(n) => n,
        }
    }
}
