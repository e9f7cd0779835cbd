//! Single-attempt HTTP transport.
//!
//! Performs one GET per call with a hard wall-clock timeout and maps the
//! outcome onto [`FetchError`]. Whether to try again is the retry policy's
//! decision, never this layer's.

use crate::fetch::FetchError;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Identifies this server to the remote API.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt carried on a status error.
const BODY_EXCERPT_CHARS: usize = 256;

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Wall-clock budget for a single attempt
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(30_000),
        }
    }
}

/// Single-shot HTTP GET transport.
///
/// Owns one `reqwest::Client`. Every request carries `Accept:
/// application/json` and an identifying `User-Agent`; expiry of the
/// per-attempt timeout abandons the in-flight call.
pub struct Transport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Perform a single GET against `url` and return the raw body on 2xx.
    pub async fn send(&self, url: Url) -> Result<Bytes, FetchError> {
        debug!(%url, "Fetching");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());
            let body = response
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty())
                .map(|body| body.chars().take(BODY_EXCERPT_CHARS).collect());

            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                retry_after,
                body,
            });
        }

        response.bytes().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            FetchError::Network(error.to_string())
        }
    }
}
