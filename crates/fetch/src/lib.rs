//! Sub-dictionary fetching.
//!
//! This crate turns a [`LookupKey`] into one request per sub-dictionary and
//! runs them all at once. Every leg goes through the retry policy on its own,
//! and a leg that still fails after its last attempt becomes a failed
//! [`SourceOutcome`] rather than an error: a lookup never aborts because one
//! dataset is slow or down.
//!
//! ## Pieces
//!
//! - [`Transport`] - the `get(path, params)` seam; [`HttpTransport`] is the
//!   `reqwest` implementation
//! - [`RetryConfig`] / [`execute_with_retry_async`] - bounded retry loop with
//!   fixed or exponential backoff
//! - [`Dispatcher`] - wait-for-all, fail-independently fan-out
//!
//! ## Quick example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fetch::{Dispatcher, HttpTransport, LookupKey, LookupOptions, RetryConfig, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cfg = TransportConfig::default();
//!     let transport = Arc::new(HttpTransport::new(&cfg).unwrap());
//!     let dispatcher = Dispatcher::new(transport, RetryConfig::default(), cfg.timeout);
//!
//!     let key = LookupKey::new("kalem", &LookupOptions::default()).unwrap();
//!     for outcome in dispatcher.fan_out(&key.queries()).await {
//!         println!("{}: ok={}", outcome.source, outcome.is_success());
//!     }
//! }
//! ```

pub mod error;
pub mod retry;
pub mod source;
pub mod transport;

mod dispatch;
mod payload;
mod serde_millis;

pub use crate::dispatch::{Dispatcher, SourceOutcome};
pub use crate::error::FetchError;
pub use crate::payload::{parse_items, parse_json};
pub use crate::retry::{execute_with_retry_async, RetryConfig, RetryResult};
pub use crate::source::{
    LookupKey, LookupOptions, SourceQuery, SubDictionary, UnknownSubDictionary, LOOKUP_KEY_PREFIX,
};
pub use crate::transport::{HttpTransport, Transport, TransportConfig, TransportResponse};
