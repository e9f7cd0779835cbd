//! Marvel Rivals API provider.
//!
//! Builds one [`RemoteRequest`] per endpoint and submits it through the
//! scheduler, retry policy, and transport. Errors pass upward unchanged;
//! the composite hero-info operation fails atomically when either of its
//! sub-calls fails.

use crate::config::{ConfigError, ServerConfig};
use crate::fetch::{FetchError, RetryConfig, RetryPolicy, Transport, TransportConfig};
use crate::provider::{GameDataProvider, RemoteRequest};
use crate::scheduler::{RequestScheduler, SchedulerConfig};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Provider backed by the public Marvel Rivals statistics API.
///
/// Owns the scheduler that gates all of its outbound calls; the scheduler
/// is shared by every operation of this instance, never process-global.
pub struct RivalsApiProvider {
    base_url: Url,
    transport: Transport,
    retry: RetryPolicy,
    scheduler: RequestScheduler,
}

impl RivalsApiProvider {
    pub fn new(config: &ServerConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url()?;

        let transport = Transport::new(TransportConfig {
            timeout: Duration::from_millis(config.fetch.timeout_ms),
        })
        .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let retry = RetryPolicy::new(RetryConfig {
            retries: config.fetch.retries,
            retry_delay: Duration::from_millis(config.fetch.retry_delay_ms),
        });

        let scheduler = RequestScheduler::new(SchedulerConfig {
            max_concurrent: config.scheduler.max_concurrent,
            window: Duration::from_millis(config.scheduler.window_ms),
            window_cap: config.scheduler.window_cap,
        });

        Ok(Self {
            base_url,
            transport,
            retry,
            scheduler,
        })
    }

    /// Submit one endpoint call through the admission gate and decode the
    /// body as JSON.
    async fn request(&self, request: RemoteRequest) -> Result<Value, FetchError> {
        let url = request.url(&self.base_url)?;
        let body = self
            .scheduler
            .run(|| self.retry.execute(|| self.transport.send(url.clone())))
            .await?;
        serde_json::from_slice(&body).map_err(FetchError::InvalidResponse)
    }
}

#[async_trait]
impl GameDataProvider for RivalsApiProvider {
    async fn list_heroes(&self) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["heroes"])).await
    }

    async fn hero_abilities(&self, identifier: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["heroes", "abilities", identifier]))
            .await
    }

    async fn hero_info(&self, identifier: &str) -> Result<Value, FetchError> {
        // Information and abilities are independent fetches; run both
        // concurrently and merge. Either failure fails the whole operation
        // and discards the other result.
        let info = self.request(RemoteRequest::new(["heroes", "information", identifier]));
        let abilities = self.hero_abilities(identifier);
        let (mut info, abilities) = tokio::try_join!(info, abilities)?;

        if let Value::Object(record) = &mut info {
            record.insert("abilities".to_string(), abilities);
        }
        Ok(info)
    }

    async fn hero_skins(&self, id: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["heroes", "skins", id])).await
    }

    async fn list_skins(&self) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["skins"])).await
    }

    async fn list_achievements(&self) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["achievements"])).await
    }

    async fn search_achievement(&self, name: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["achievements", name])).await
    }

    async fn list_items(&self) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["items"])).await
    }

    async fn items_by_type(&self, item_type: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["items", item_type])).await
    }

    async fn list_maps(&self) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["maps"])).await
    }

    async fn filter_maps(&self, filter: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["maps", filter])).await
    }

    async fn player_profile(&self, identifier: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["player", "profile", identifier]))
            .await
    }

    async fn search_player(&self, username: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["search_player", username]))
            .await
    }

    async fn player_match_history(&self, identifier: &str) -> Result<Value, FetchError> {
        self.request(RemoteRequest::new(["player", identifier, "match-history"]))
            .await
    }
}
