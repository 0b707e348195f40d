//! YAML configuration for the dictionary service.
//!
//! Every section is optional and falls back to its defaults, so an empty
//! document with only a `version` is a valid configuration.
//!
//! ```yaml
//! version: "1"
//!
//! transport:
//!   base_url: "https://sozluk.gov.tr"
//!   timeout_ms: 5000
//!   connect_timeout_ms: 3000
//!
//! retry:
//!   max_retries: 2
//!   base_delay_ms: 250
//!   max_delay_ms: 2000
//!   exponential: true
//!   jitter: false
//!
//! cache:
//!   enabled: true
//!   lookup_ttl_secs: 3600
//!   daily_word_ttl_secs: 21600
//!   pool_ttl_secs: 86400
//!   sweep_interval_secs: 300
//!
//! matching:
//!   suggestion_count: 5
//!   max_similar: 50
//!   max_pattern_len: 64
//!   max_wildcard_results: 100
//!
//! coalesce_requests: true
//! log_level: "info"
//! ```
//!
//! After loading, `SOZLUK_BASE_URL`, `SOZLUK_TIMEOUT_MS`,
//! `SOZLUK_CACHE_ENABLED` and `SOZLUK_MAX_RETRIES` override the file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use cache::CacheConfig;
use fetch::{RetryConfig, TransportConfig};
use matcher::MatchingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SozlukConfig {
    /// Configuration format version.
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub matching: MatchingConfig,

    /// Share one in-flight fan-out between concurrent identical lookups.
    #[serde(default = "true_value")]
    pub coalesce_requests: bool,

    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SozlukConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            name: None,
            transport: TransportConfig::default(),
            retry: RetryConfig::default(),
            cache: CacheSettings::default(),
            matching: MatchingConfig::default(),
            coalesce_requests: true,
            log_level: default_log_level(),
        }
    }
}

impl SozlukConfig {
    /// Loads and validates a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SozlukConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `SOZLUK_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides from any variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SOZLUK_BASE_URL") {
            self.transport.base_url = url;
        }
        if let Some(raw) = lookup("SOZLUK_TIMEOUT_MS") {
            let ms = parse_env("SOZLUK_TIMEOUT_MS", &raw)?;
            self.transport.timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("SOZLUK_CACHE_ENABLED") {
            self.cache.enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigLoadError::InvalidEnv {
                        var: "SOZLUK_CACHE_ENABLED",
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup("SOZLUK_MAX_RETRIES") {
            self.retry.max_retries = parse_env("SOZLUK_MAX_RETRIES", &raw)?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.transport.base_url.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "transport.base_url must not be empty".to_string(),
            ));
        }
        if self.transport.timeout.is_zero() {
            return Err(ConfigLoadError::Validation(
                "transport.timeout_ms must be >= 1".to_string(),
            ));
        }
        if self.retry.max_delay < self.retry.base_delay {
            return Err(ConfigLoadError::Validation(
                "retry.max_delay_ms must be >= retry.base_delay_ms".to_string(),
            ));
        }
        self.cache.validate()?;
        if self.matching.max_pattern_len == 0 {
            return Err(ConfigLoadError::Validation(
                "matching.max_pattern_len must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cache section: switch, per-kind TTLs, sweep period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "true_value")]
    pub enabled: bool,

    #[serde(default = "default_lookup_ttl_secs")]
    pub lookup_ttl_secs: u64,

    #[serde(default = "default_daily_word_ttl_secs")]
    pub daily_word_ttl_secs: u64,

    #[serde(default = "default_pool_ttl_secs")]
    pub pool_ttl_secs: u64,

    /// 0 disables the background sweep; expiry is then only checked on access.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lookup_ttl_secs: default_lookup_ttl_secs(),
            daily_word_ttl_secs: default_daily_word_ttl_secs(),
            pool_ttl_secs: default_pool_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl CacheSettings {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.enabled && self.lookup_ttl_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "cache.lookup_ttl_secs must be >= 1 when the cache is enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn lookup_ttl(&self) -> Duration {
        Duration::from_secs(self.lookup_ttl_secs)
    }

    pub fn daily_word_ttl(&self) -> Duration {
        Duration::from_secs(self.daily_word_ttl_secs)
    }

    pub fn pool_ttl(&self) -> Duration {
        Duration::from_secs(self.pool_ttl_secs)
    }

    /// Settings for the underlying store; lookups are the default TTL.
    pub fn store_config(&self) -> CacheConfig {
        CacheConfig {
            enabled: self.enabled,
            default_ttl_secs: self.lookup_ttl_secs,
            sweep_interval_secs: self.sweep_interval_secs,
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigLoadError> {
    raw.trim().parse().map_err(|_| ConfigLoadError::InvalidEnv {
        var,
        value: raw.to_string(),
    })
}

fn true_value() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_lookup_ttl_secs() -> u64 {
    60 * 60
}
fn default_daily_word_ttl_secs() -> u64 {
    6 * 60 * 60
}
fn default_pool_ttl_secs() -> u64 {
    24 * 60 * 60
}
fn default_sweep_interval_secs() -> u64 {
    5 * 60
}
