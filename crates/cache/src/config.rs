use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache layer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// When false every read misses and every write is dropped.
    #[serde(default = "CacheConfig::default_enabled")]
    pub enabled: bool,
    /// TTL used by [`TtlCache::insert`](crate::TtlCache::insert).
    #[serde(default = "CacheConfig::default_ttl_secs")]
    pub default_ttl_secs: u64,
    /// Period of the background expiry sweep; 0 disables it.
    #[serde(default = "CacheConfig::default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            default_ttl_secs: Self::default_ttl_secs(),
            sweep_interval_secs: Self::default_sweep_interval_secs(),
        }
    }
}

impl CacheConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_ttl_secs() -> u64 {
        60 * 60
    }

    fn default_sweep_interval_secs() -> u64 {
        5 * 60
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl_secs = ttl.as_secs();
        self
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}
