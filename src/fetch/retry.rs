//! Bounded retry with linear backoff.
//!
//! Wraps a single logical request across up to `retries` additional
//! attempts. Classification:
//!
//! - 429: retried, delay from `Retry-After` when present, else linear
//!   backoff; exhaustion raises [`FetchError::RateLimited`]
//! - 5xx: retried with linear backoff while attempts remain
//! - any other non-2xx status: terminal immediately
//! - timeout: terminal immediately
//! - transport-level failure: retried while attempts remain
//!
//! Backoff for one request never blocks another: the sleep happens inside
//! the caller's own future.

use crate::fetch::FetchError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts after the first (total tries = retries + 1)
    pub retries: u32,
    /// Linear backoff base; attempt n sleeps base * (n + 1)
    pub retry_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay: Duration::from_millis(1_000),
        }
    }
}

/// Executes one logical request across bounded attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Linear backoff delay for the given zero-based attempt index.
    fn backoff(&self, attempt: u32) -> Duration {
        self.config.retry_delay * (attempt + 1)
    }

    /// Run `attempt_fn` until it succeeds, fails terminally, or attempts
    /// are exhausted. Total attempts never exceed `retries + 1`.
    pub async fn execute<T, F, Fut>(&self, mut attempt_fn: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let retries = self.config.retries;
        let mut last_error = None;

        for attempt in 0..=retries {
            let err = match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            match err {
                FetchError::Status {
                    status: 429,
                    retry_after,
                    ..
                } => {
                    if attempt == retries {
                        return Err(FetchError::RateLimited {
                            attempts: retries + 1,
                        });
                    }
                    let delay = retry_after
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| self.backoff(attempt));
                    warn!(delay_ms = delay.as_millis() as u64, "Rate limited, retrying");
                    sleep(delay).await;
                }
                err if err.status().is_some_and(|s| s >= 500) && attempt < retries => {
                    let delay = self.backoff(attempt);
                    warn!(
                        status = err.status().unwrap_or_default(),
                        delay_ms = delay.as_millis() as u64,
                        "Server error, retrying"
                    );
                    last_error = Some(err);
                    sleep(delay).await;
                }
                err @ FetchError::Status { .. } => return Err(err),
                err @ FetchError::Timeout { .. } => return Err(err),
                err if attempt < retries => {
                    let delay = self.backoff(attempt);
                    warn!(
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, retrying"
                    );
                    last_error = Some(err);
                    sleep(delay).await;
                }
                err => return Err(err),
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Network("Unknown error".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn policy(retries: u32) -> RetryPolicy {
        RetryPolicy::new(RetryConfig {
            retries,
            retry_delay: Duration::from_millis(10),
        })
    }

    fn status_error(status: u16) -> FetchError {
        FetchError::Status {
            status,
            status_text: "test".to_string(),
            retry_after: None,
            body: None,
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(3)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, FetchError>(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_then_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(3)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    if attempt < 2 {
                        Err(FetchError::Network("connection reset".to_string()))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        // Two failures then success: exactly three attempts
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(3)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(FetchError::Network("connection reset".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(FetchError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_server_errors_retry_until_exhaustion() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(2)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(status_error(503))
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_terminal() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(3)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(status_error(404))
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(404));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_terminal() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(3)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(FetchError::Timeout { timeout_ms: 100 })
                }
            })
            .await;

        assert!(matches!(result, Err(FetchError::Timeout { timeout_ms: 100 })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(3)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    if attempt == 0 {
                        Err(status_error(429))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = policy(2)
            .execute(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(status_error(429))
                }
            })
            .await;

        assert!(matches!(
            result,
            Err(FetchError::RateLimited { attempts: 3 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_after_overrides_linear_backoff() {
        // Base delay of 5s would dominate the test; Retry-After of 0s must
        // win over it.
        let policy = RetryPolicy::new(RetryConfig {
            retries: 1,
            retry_delay: Duration::from_secs(5),
        });
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result = policy
            .execute(move || {
                let counter = counter.clone();
                async move {
                    let attempt = counter.fetch_add(1, Ordering::SeqCst);
                    if attempt == 0 {
                        Err(FetchError::Status {
                            status: 429,
                            status_text: "Too Many Requests".to_string(),
                            retry_after: Some(0),
                            body: None,
                        })
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_backoff_grows_monotonically() {
        let policy = policy(3);
        assert_eq!(policy.backoff(0), Duration::from_millis(10));
        assert_eq!(policy.backoff(1), Duration::from_millis(20));
        assert_eq!(policy.backoff(2), Duration::from_millis(30));
    }
}
