//! Result cache for dictionary lookups and derived lists.
//!
//! [`TtlCache`] is an explicitly owned component: the lookup pipeline holds
//! one instance and passes it around, so tests and differently configured
//! services never share state.
//!
//! Caching is best-effort. A disabled cache (see [`CacheConfig::disabled`])
//! makes every read miss, which changes latency and nothing else.

mod config;
mod entry;
mod store;

pub use crate::config::CacheConfig;
pub use crate::entry::CacheEntry;
pub use crate::store::{CacheStats, Invalidation, TtlCache};
