//! Server configuration.
//!
//! Every field has a working default, so the server runs with no
//! configuration file at all. A TOML file can override any section:
//!
//! ```toml
//! [api]
//! base_url = "https://marvelsapi.com/api"
//!
//! [fetch]
//! timeout_ms = 30000
//! retries = 3
//! retry_delay_ms = 1000
//!
//! [scheduler]
//! max_concurrent = 5
//! window_ms = 1000
//! window_cap = 30
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Top-level configuration, assembled from defaults and an optional file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub fetch: FetchSection,
    #[serde(default)]
    pub scheduler: SchedulerSection,
}

/// Remote API endpoint settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiSection {
    /// Base URL of the statistics API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Outbound request pipeline settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FetchSection {
    /// Wall-clock budget per attempt in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Additional attempts after the first
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Linear backoff base in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Admission gate settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchedulerSection {
    /// Maximum requests in flight at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Length of the rolling rate window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    /// Admissions allowed per rolling window
    #[serde(default = "default_window_cap")]
    pub window_cap: usize,
}

fn default_base_url() -> String {
    "https://marvelsapi.com/api".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_max_concurrent() -> usize {
    5
}

fn default_window_ms() -> u64 {
    1_000
}

fn default_window_cap() -> usize {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            window_ms: default_window_ms(),
            window_cap: default_window_cap(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// Parsed and validated remote base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
            source,
        })
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
