//! Outbound HTTP pipeline: single-attempt transport plus bounded retry.
//!
//! [`Transport`] performs exactly one GET per call and classifies the
//! outcome; [`RetryPolicy`] wraps a transport call across bounded attempts
//! with linear backoff. Neither layer produces user-facing text; both raise
//! [`FetchError`] and leave translation to the dispatcher.

pub mod retry;
pub mod transport;

pub use retry::{RetryConfig, RetryPolicy};
pub use transport::{Transport, TransportConfig};

use thiserror::Error;

/// Failures raised by the outbound request pipeline
#[derive(Debug, Error)]
pub enum FetchError {
    /// A single attempt exceeded its wall-clock budget. Terminal: timeouts
    /// are not retried.
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Non-2xx response. 429 and 5xx are retried by [`RetryPolicy`]; any
    /// other status is terminal on first sight.
    #[error("HTTP {status}: {status_text}")]
    Status {
        status: u16,
        status_text: String,
        /// Parsed `Retry-After` header in seconds, when the server sent one
        retry_after: Option<u64>,
        /// Truncated response body, when one was readable
        body: Option<String>,
    },

    /// Every attempt was answered with 429.
    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Response body was not valid JSON.
    #[error("Invalid JSON response")]
    InvalidResponse(#[source] serde_json::Error),

    /// Connection-level failure (reset, DNS, TLS, ...). Retryable.
    #[error("Network error: {0}")]
    Network(String),
}

impl FetchError {
    /// HTTP status code when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
