//! Fan-out dispatch: one retried call per sub-dictionary, all in flight at once.
//!
//! Legs are polled together on the caller's task with `join_all`, so nothing
//! is spawned and no leg can cancel or delay a sibling. The dispatcher waits
//! for every leg to settle and returns one [`SourceOutcome`] per query, in
//! query order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn, Instrument, Level};

use crate::error::FetchError;
use crate::payload::{parse_items, parse_json};
use crate::retry::{execute_with_retry_async, RetryConfig};
use crate::source::{SourceQuery, SubDictionary};
use crate::transport::{Transport, TransportResponse};

/// Settled result of one [`SourceQuery`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub source: SubDictionary,
    /// Attempts spent, first try included.
    pub attempts: u32,
    pub elapsed: Duration,
    /// Item list on success, the final error once retries are exhausted.
    pub result: Result<Vec<Value>, FetchError>,
}

impl SourceOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Items on success, `None` on failure.
    pub fn items(&self) -> Option<&[Value]> {
        self.result.as_deref().ok()
    }
}

/// Executes sub-dictionary queries through the retry policy.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    retry: RetryConfig,
    call_timeout: Duration,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryConfig, call_timeout: Duration) -> Self {
        Self {
            transport,
            retry,
            call_timeout,
        }
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Runs every query concurrently and waits for all of them to settle.
    pub async fn fan_out(&self, queries: &[SourceQuery]) -> Vec<SourceOutcome> {
        let span = tracing::span!(Level::INFO, "fetch.fan_out", legs = queries.len());
        let start = Instant::now();

        let outcomes = join_all(queries.iter().map(|query| self.fetch_one(query)))
            .instrument(span)
            .await;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(
            legs = outcomes.len(),
            failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fan_out_settled"
        );
        outcomes
    }

    /// Runs one query through the retry policy. Never fails; failures are
    /// recorded in the outcome.
    pub async fn fetch_one(&self, query: &SourceQuery) -> SourceOutcome {
        let source = query.source();
        let retried = execute_with_retry_async(&self.retry, |attempt| async move {
            if attempt > 0 {
                debug!(source = %source, attempt, "leg_retry");
            }
            let response = self.get(query.path(), query.params()).await?;
            parse_items(&response)
        })
        .await;

        if let Err(err) = &retried.result {
            warn!(
                source = %source,
                attempts = retried.attempts,
                kind = err.kind(),
                error = %err,
                "leg_failed"
            );
        }

        SourceOutcome {
            source,
            attempts: retried.attempts,
            elapsed: retried.total_duration,
            result: retried.result,
        }
    }

    /// Retried GET returning the whole JSON document, for endpoints that are
    /// not item lists (daily content, autocomplete).
    pub async fn fetch_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, FetchError> {
        let retried = execute_with_retry_async(&self.retry, |attempt| async move {
            if attempt > 0 {
                debug!(path, attempt, "json_retry");
            }
            let response = self.get(path, params).await?;
            parse_json(&response)
        })
        .await;

        if let Err(err) = &retried.result {
            warn!(path, attempts = retried.attempts, error = %err, "json_fetch_failed");
        }
        retried.result
    }

    /// Single attempt with the per-call deadline applied.
    async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<TransportResponse, FetchError> {
        match tokio::time::timeout(self.call_timeout, self.transport.get(path, params)).await {
            Ok(response) => response,
            Err(_) => Err(FetchError::Timeout(self.call_timeout)),
        }
    }
}
