//! `ProviderRegistry` (§4.2): the immutable, startup-built mapping from
//! provider name to provider instance plus its configuration.

use std::collections::HashMap;
use std::sync::Arc;

use mediasearch_core::provider::Provider;
use mediasearch_types::{ProviderConfig, ProviderName};
#[cfg(feature = "tracing")]
use tracing::warn;

/// Point-in-time description of a single provider, as returned by
/// `provider_statuses`.
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    /// Provider identity.
    pub name: ProviderName,
    /// Whether the provider is enabled.
    pub enabled: bool,
    /// Merge-precedence priority; lower sorts earlier.
    pub priority: u32,
    /// Configured rate-limit quota, if any.
    pub rate_limit: Option<u32>,
    /// Units remaining in the current rate-limit window.
    pub remaining: Option<u64>,
    /// Seconds until the rate-limit window resets.
    pub reset_seconds: u64,
}

struct Entry<T> {
    provider: Arc<dyn Provider<Item = T>>,
    config: ProviderConfig,
}

/// Holds the registered providers for a single media kind (stations or
/// podcasts), immutable after construction.
pub struct ProviderRegistry<T> {
    entries: HashMap<ProviderName, Entry<T>>,
}

impl<T> ProviderRegistry<T> {
    /// Build a registry from `(provider, config)` pairs. A `config` with
    /// `enabled = false` is kept (so `statuses()` can still report it) but
    /// never returned by `enabled()`.
    #[must_use]
    pub fn new(providers: Vec<(Arc<dyn Provider<Item = T>>, ProviderConfig)>) -> Self {
        let mut entries = HashMap::new();
        for (provider, config) in providers {
            entries.insert(provider.name(), Entry { provider, config });
        }
        Self { entries }
    }

    /// Providers with `enabled = true` whose name is in `filter` (if given),
    /// sorted ascending by priority with a stable name tie-break.
    #[must_use]
    pub fn enabled(&self, filter: &[ProviderName]) -> Vec<Arc<dyn Provider<Item = T>>> {
        let mut out: Vec<&Entry<T>> = self
            .entries
            .values()
            .filter(|e| e.config.enabled && e.provider.is_available())
            .filter(|e| filter.is_empty() || filter.contains(&e.provider.name()))
            .collect();
        out.sort_by_key(|e| (e.config.priority, e.provider.name()));
        out.into_iter().map(|e| Arc::clone(&e.provider)).collect()
    }

    /// Configured priority for `name`, used by the ranker. Providers absent
    /// from the registry (should not happen for `ProviderName::ALL`, but
    /// defensive against misconfiguration) sort last.
    #[must_use]
    pub fn priority_of(&self, name: ProviderName) -> u32 {
        self.entries
            .get(&name)
            .map_or(u32::MAX, |e| e.config.priority)
    }

    /// Warn once per missing known provider. Call after construction if
    /// `known` names (e.g. `ProviderName::ALL` restricted to this kind)
    /// were expected but absent.
    pub fn warn_missing(&self, known: &[ProviderName]) {
        for name in known {
            if !self.entries.contains_key(name) {
                #[cfg(feature = "tracing")]
                warn!(provider = name.as_str(), "no configuration for known provider, skipping");
                #[cfg(not(feature = "tracing"))]
                let _ = name;
            }
        }
    }

    /// Configuration for `name`, if registered.
    #[must_use]
    pub fn config_of(&self, name: ProviderName) -> Option<&ProviderConfig> {
        self.entries.get(&name).map(|e| &e.config)
    }

    /// All registered provider names, for status reporting.
    #[must_use]
    pub fn names(&self) -> Vec<ProviderName> {
        self.entries.keys().copied().collect()
    }

    /// Priority map for every registered provider, as the ranker needs it.
    #[must_use]
    pub fn priorities(&self) -> HashMap<ProviderName, u32> {
        self.entries
            .iter()
            .map(|(name, e)| (*name, e.config.priority))
            .collect()
    }
}
