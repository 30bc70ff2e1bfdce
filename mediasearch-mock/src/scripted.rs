//! A `Provider` whose results are scripted by the test rather than fetched
//! from an upstream, mirroring the corpus's dynamic-mock-connector pattern
//! but specialized to the infallible, generic `Provider` contract.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mediasearch_core::provider::{Provider, SearchParams};
use mediasearch_types::ProviderName;

/// Instruction for how a `ScriptedProvider::search` call should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior<Item> {
    /// Return these items.
    Return(Vec<Item>),
    /// Return an empty list, as a real adapter would on an isolated upstream
    /// failure.
    Empty,
    /// Hang indefinitely, simulating a provider call that never returns
    /// before its deadline.
    Hang,
}

/// A `Provider` driven entirely by a scripted behavior, with a call counter
/// tests can assert against to prove "no upstream call was made" (cache
/// hits, rate-limit denial).
pub struct ScriptedProvider<Item> {
    name: ProviderName,
    requires_auth: bool,
    available: AtomicBool,
    behavior: Mutex<MockBehavior<Item>>,
    calls: AtomicUsize,
}

impl<Item: Clone + Send + Sync> ScriptedProvider<Item> {
    /// Build a provider that always returns `items` until reconfigured.
    #[must_use]
    pub fn returning(name: ProviderName, items: Vec<Item>) -> Self {
        Self::new(name, MockBehavior::Return(items))
    }

    /// Build a provider with an explicit initial behavior.
    #[must_use]
    pub fn new(name: ProviderName, behavior: MockBehavior<Item>) -> Self {
        Self {
            name,
            requires_auth: false,
            available: AtomicBool::new(true),
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
        }
    }

    /// Mark this provider as requiring auth (affects `requires_auth` only;
    /// `is_available` is controlled separately via `set_available`).
    #[must_use]
    pub const fn requiring_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Replace the scripted behavior for subsequent `search` calls.
    pub fn set_behavior(&self, behavior: MockBehavior<Item>) {
        *self.behavior.lock().expect("mutex poisoned") = behavior;
    }

    /// Toggle whether the registry should treat this provider as available.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of `search` calls observed so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reset the call counter to zero.
    pub fn reset_call_count(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl<Item: Clone + Send + Sync> Provider for ScriptedProvider<Item> {
    type Item = Item;

    fn name(&self) -> ProviderName {
        self.name
    }

    fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn search(&self, _params: &SearchParams) -> Vec<Self::Item> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().expect("mutex poisoned").clone();
        match behavior {
            MockBehavior::Return(items) => items,
            MockBehavior::Empty => Vec::new(),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
