//! Bounded retry with fixed or exponential backoff.
//!
//! Every failure is retried the same way until the attempt budget runs out.
//! There is no error classification here: a timeout, a 503 and a garbled body
//! all get the same treatment.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first try. Total attempts are `max_retries + 1`.
    #[serde(default = "RetryConfig::default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry.
    #[serde(
        default = "RetryConfig::default_base_delay",
        with = "crate::serde_millis",
        rename = "base_delay_ms"
    )]
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    #[serde(
        default = "RetryConfig::default_max_delay",
        with = "crate::serde_millis",
        rename = "max_delay_ms"
    )]
    pub max_delay: Duration,
    /// Double the delay after each failed attempt instead of keeping it fixed.
    #[serde(default = "RetryConfig::default_exponential")]
    pub exponential: bool,
    /// Add up to 50% random jitter to each delay.
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: Self::default_max_retries(),
            base_delay: Self::default_base_delay(),
            max_delay: Self::default_max_delay(),
            exponential: Self::default_exponential(),
            jitter: false,
        }
    }
}

impl RetryConfig {
    fn default_max_retries() -> u32 {
        2
    }

    fn default_base_delay() -> Duration {
        Duration::from_millis(250)
    }

    fn default_max_delay() -> Duration {
        Duration::from_secs(2)
    }

    fn default_exponential() -> bool {
        true
    }

    /// No retries at all; one attempt per call.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_exponential(mut self, exponential: bool) -> Self {
        self.exponential = exponential;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Total number of attempts, first try included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Result of a retried operation.
#[derive(Debug, Clone)]
pub struct RetryResult<T, E> {
    /// Last outcome: the first success, or the final failure.
    pub result: Result<T, E>,
    /// Number of attempts made (1 = no retries needed).
    pub attempts: u32,
    /// Wall-clock time across all attempts and delays.
    pub total_duration: Duration,
}

impl<T, E> RetryResult<T, E> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

/// Runs `operation` until it succeeds or the attempt budget is spent.
///
/// Each attempt is a fresh invocation of `operation`; nothing from a failed
/// attempt is carried into the next one. The closure receives the zero-based
/// attempt number.
pub async fn execute_with_retry_async<T, E, F, Fut>(
    config: &RetryConfig,
    mut operation: F,
) -> RetryResult<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let max_attempts = config.max_attempts();
    let mut attempt = 0;

    loop {
        let outcome = operation(attempt).await;
        attempt += 1;

        match outcome {
            Ok(value) => {
                return RetryResult {
                    result: Ok(value),
                    attempts: attempt,
                    total_duration: start.elapsed(),
                };
            }
            Err(error) if attempt >= max_attempts => {
                return RetryResult {
                    result: Err(error),
                    attempts: attempt,
                    total_duration: start.elapsed(),
                };
            }
            Err(_) => {
                let delay = calculate_delay(config, attempt - 1);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Delay to wait after the given zero-based failed attempt.
fn calculate_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let base = config.base_delay.as_millis() as u64;
    let scaled = if config.exponential {
        base.saturating_mul(2_u64.saturating_pow(attempt))
    } else {
        base
    };
    let delay = scaled.min(config.max_delay.as_millis() as u64);

    if config.jitter && delay > 0 {
        let jitter = fastrand::u64(0..=delay / 2);
        Duration::from_millis(delay + jitter)
    } else {
        Duration::from_millis(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn instant_config(max_retries: u32) -> RetryConfig {
        RetryConfig::default()
            .with_max_retries(max_retries)
            .with_base_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn retry_succeeds_eventually() {
        let calls = AtomicU32::new(0);
        let result = execute_with_retry_async(&instant_config(3), |_attempt| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err("not yet")
                } else {
                    Ok("success")
                }
            }
        })
        .await;

        assert!(result.succeeded());
        assert_eq!(result.attempts, 3);
        assert_eq!(result.into_result(), Ok("success"));
    }

    #[tokio::test]
    async fn retries_exactly_max_attempts_minus_one() {
        let calls = AtomicU32::new(0);
        let config = instant_config(2);
        let result: RetryResult<(), &str> = execute_with_retry_async(&config, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("always fails") }
        })
        .await;

        assert!(!result.succeeded());
        assert_eq!(result.attempts, config.max_attempts());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.into_result(), Err("always fails"));
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: RetryResult<(), &str> = execute_with_retry_async(&RetryConfig::none(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("nope") }
        })
        .await;

        assert_eq!(result.attempts, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn attempt_numbers_are_zero_based() {
        let mut seen = Vec::new();
        let _: RetryResult<(), ()> = execute_with_retry_async(&instant_config(2), |attempt| {
            seen.push(attempt);
            async { Err(()) }
        })
        .await;
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn no_delay_on_success() {
        let config = RetryConfig::default().with_base_delay(Duration::from_secs(5));
        let result: RetryResult<&str, ()> =
            execute_with_retry_async(&config, |_| async { Ok("immediate") }).await;

        assert_eq!(result.attempts, 1);
        assert!(result.total_duration < Duration::from_secs(1));
    }

    #[test]
    fn exponential_delay_is_capped() {
        let config = RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(350));
        assert_eq!(calculate_delay(&config, 0), Duration::from_millis(100));
        assert_eq!(calculate_delay(&config, 1), Duration::from_millis(200));
        assert_eq!(calculate_delay(&config, 2), Duration::from_millis(350));
        assert_eq!(calculate_delay(&config, 40), Duration::from_millis(350));
    }

    #[test]
    fn fixed_delay_stays_flat() {
        let config = RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_exponential(false);
        assert_eq!(calculate_delay(&config, 0), Duration::from_millis(100));
        assert_eq!(calculate_delay(&config, 5), Duration::from_millis(100));
    }

    #[test]
    fn jitter_stays_within_half() {
        let config = RetryConfig::default()
            .with_base_delay(Duration::from_millis(100))
            .with_exponential(false)
            .with_jitter(true);
        for _ in 0..50 {
            let d = calculate_delay(&config, 0);
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(150));
        }
    }

    #[test]
    fn config_serializes_delays_as_millis() {
        let json = serde_json::to_value(RetryConfig::default()).unwrap();
        assert_eq!(json["base_delay_ms"], 250);
        assert_eq!(json["max_delay_ms"], 2000);

        let parsed: RetryConfig = serde_json::from_str(r#"{"max_retries": 5}"#).unwrap();
        assert_eq!(parsed.max_retries, 5);
        assert_eq!(parsed.base_delay, Duration::from_millis(250));
    }
}
