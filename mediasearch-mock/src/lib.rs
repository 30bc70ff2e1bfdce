//! mediasearch-mock
//!
//! Scripted `Provider` implementations and deterministic fixture data, used
//! by `mediasearch-middleware`'s and `mediasearch`'s own test suites instead
//! of reaching any real upstream.
#![warn(missing_docs)]

mod scripted;

/// Deterministic fixture data for the end-to-end scenarios.
pub mod fixtures;

pub use scripted::{MockBehavior, ScriptedProvider};
