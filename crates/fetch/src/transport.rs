//! HTTP transport seam.
//!
//! The dispatcher only needs `get(path, params) -> {status, body}`. The
//! production implementation is [`HttpTransport`] on top of `reqwest`; tests
//! plug in scripted transports.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Raw response from the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response access to the remote dictionary service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET for `path` relative to the base address.
    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, FetchError>;

    /// Base address, used to build absolute links such as audio files.
    fn base_url(&self) -> &str;
}

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Base address of the dictionary service, without trailing slash.
    #[serde(default = "TransportConfig::default_base_url")]
    pub base_url: String,
    /// Deadline for a single remote call.
    #[serde(
        default = "TransportConfig::default_timeout",
        with = "crate::serde_millis",
        rename = "timeout_ms"
    )]
    pub timeout: Duration,
    #[serde(
        default = "TransportConfig::default_connect_timeout",
        with = "crate::serde_millis",
        rename = "connect_timeout_ms"
    )]
    pub connect_timeout: Duration,
    #[serde(default = "TransportConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "TransportConfig::default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
            connect_timeout: Self::default_connect_timeout(),
            user_agent: Self::default_user_agent(),
            pool_max_idle_per_host: Self::default_pool_max_idle(),
        }
    }
}

impl TransportConfig {
    fn default_base_url() -> String {
        "https://sozluk.gov.tr".to_string()
    }

    fn default_timeout() -> Duration {
        Duration::from_secs(5)
    }

    fn default_connect_timeout() -> Duration {
        Duration::from_secs(3)
    }

    fn default_user_agent() -> String {
        concat!("sozluk/", env!("CARGO_PKG_VERSION")).to_string()
    }

    fn default_pool_max_idle() -> usize {
        16
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `reqwest`-backed transport with connection pooling.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl HttpTransport {
    pub fn new(cfg: &TransportConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout)
            .pool_max_idle_per_host(cfg.pool_max_idle_per_host)
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            timeout: cfg.timeout,
            connect_timeout: cfg.connect_timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        let deadline = if err.is_connect() {
            self.connect_timeout
        } else {
            self.timeout
        };
        FetchError::from_reqwest(err, deadline)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| self.classify(err))?;
        Ok(TransportResponse { status, body })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
