//! Shared HTTP client construction and response decoding for every adapter.

use std::time::Duration;

use mediasearch_core::error::ProviderError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
#[cfg(feature = "tracing")]
use tracing::warn;

/// User-Agent sent with every upstream request, identifying the product per
/// the external-interfaces contract in §6.
pub const USER_AGENT: &str = concat!("mediasearch/", env!("CARGO_PKG_VERSION"));

/// Build a `reqwest::Client` bound to a per-provider request timeout, with
/// the product User-Agent set. Building a client is cheap to call once per
/// adapter at construction time; adapters hold the client for their
/// lifetime rather than rebuilding it per call.
#[must_use]
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Decode a JSON response from `result`, logging (and discarding) any
/// `ProviderError` along the way rather than swallowing the failure
/// silently: a transport failure or non-2xx status becomes
/// `ProviderUnavailable`, an unparseable 2xx body becomes
/// `ProviderMalformed` with a truncated sample of the offending bytes.
/// `provider` names the adapter for the log line; it does not need to
/// match a `ProviderName` variant's `Display` impl.
pub async fn decode_json_response<T: DeserializeOwned>(
    result: Result<Response, reqwest::Error>,
    provider: &'static str,
) -> Option<T> {
    let resp = match result {
        Ok(resp) => resp,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            warn!(
                provider,
                error = %ProviderError::ProviderUnavailable {
                    provider,
                    detail: _err.to_string(),
                },
                "request failed"
            );
            return None;
        }
    };
    if !resp.status().is_success() {
        let _status = resp.status();
        #[cfg(feature = "tracing")]
        warn!(
            provider,
            error = %ProviderError::ProviderUnavailable {
                provider,
                detail: format!("http {_status}"),
            },
            "upstream returned non-success status"
        );
        return None;
    }
    let body = match resp.text().await {
        Ok(body) => body,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            warn!(
                provider,
                error = %ProviderError::ProviderUnavailable {
                    provider,
                    detail: _err.to_string(),
                },
                "failed to read response body"
            );
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            #[cfg(feature = "tracing")]
            warn!(
                provider,
                error = %ProviderError::ProviderMalformed {
                    provider,
                    sample: ProviderError::truncated_sample(&body),
                },
                "upstream returned malformed data"
            );
            None
        }
    }
}
