//! `Cache` contract (§4.7): a typed TTL key/value cache with raw `get`/`set`
//! at the trait boundary and typed accessors layered on top via serde.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Raw byte-oriented TTL cache backend.
///
/// Concrete implementations (e.g. the `moka`-backed in-process cache in
/// `mediasearch-middleware`) guarantee: entries expire no later than
/// `now + ttl` after insertion; a `get` during or after expiry returns
/// `None`; concurrent `get`/`set` never observes a partially constructed
/// value; backend errors are logged and reported as a miss on read / a
/// silently dropped write, never propagated to the caller.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up `key`; `None` on miss or expiry.
    async fn get_raw(&self, key: &str) -> Option<Vec<u8>>;

    /// Insert `value` under `key` with the given TTL, overwriting any
    /// existing entry (cache entries are immutable after insertion; refresh
    /// is an overwrite, never an in-place mutation).
    async fn set_raw(&self, key: &str, value: Vec<u8>, ttl: Duration);
}

/// Typed accessors layered over [`Cache::get_raw`]/[`Cache::set_raw`] via
/// JSON serialization, available for any `Cache` implementation.
#[async_trait]
pub trait TypedCacheExt: Cache {
    /// Deserialize a cached value of type `T`, if present and well-formed.
    /// A deserialization failure is treated the same as a miss.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).await?;
        serde_json::from_slice(&raw).ok()
    }

    /// Serialize and store `value` under `key` with the given TTL. A
    /// serialization failure is swallowed (logged by the caller if it
    /// wishes), matching "cache errors never fail the request."
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        if let Ok(raw) = serde_json::to_vec(value) {
            self.set_raw(key, raw, ttl).await;
        }
    }
}

impl<C: Cache + ?Sized> TypedCacheExt for C {}
