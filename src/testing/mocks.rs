//! Mock implementations for testing
//!
//! [`MockProvider`] answers every operation with a canned payload (or a
//! canned failure) and records which operations were called, so tests can
//! assert that validation failures never reach the provider.

use crate::fetch::FetchError;
use crate::provider::GameDataProvider;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Canned-response provider that records calls.
#[derive(Debug)]
pub struct MockProvider {
    /// Payload returned by every successful operation
    pub response: Value,
    pub should_fail: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            response: json!({}),
            should_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(response: Value) -> Self {
        Self {
            response,
            ..Self::new()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Operation names recorded so far, in call order.
    pub async fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, operation: &str) -> Result<Value, FetchError> {
        self.calls.lock().await.push(operation.to_string());
        if self.should_fail {
            Err(FetchError::Network("Mock provider failure".to_string()))
        } else {
            Ok(self.response.clone())
        }
    }
}

#[async_trait]
impl GameDataProvider for MockProvider {
    async fn list_heroes(&self) -> Result<Value, FetchError> {
        self.record("listHeroes").await
    }

    async fn hero_abilities(&self, _identifier: &str) -> Result<Value, FetchError> {
        self.record("getHeroAbilities").await
    }

    async fn hero_info(&self, _identifier: &str) -> Result<Value, FetchError> {
        self.record("getHeroInfo").await
    }

    async fn hero_skins(&self, _id: &str) -> Result<Value, FetchError> {
        self.record("getHeroSkins").await
    }

    async fn list_skins(&self) -> Result<Value, FetchError> {
        self.record("listSkins").await
    }

    async fn list_achievements(&self) -> Result<Value, FetchError> {
        self.record("listAchievements").await
    }

    async fn search_achievement(&self, _name: &str) -> Result<Value, FetchError> {
        self.record("searchAchievement").await
    }

    async fn list_items(&self) -> Result<Value, FetchError> {
        self.record("listItems").await
    }

    async fn items_by_type(&self, _item_type: &str) -> Result<Value, FetchError> {
        self.record("getItemsByType").await
    }

    async fn list_maps(&self) -> Result<Value, FetchError> {
        self.record("listMaps").await
    }

    async fn filter_maps(&self, _filter: &str) -> Result<Value, FetchError> {
        self.record("filterMaps").await
    }

    async fn player_profile(&self, _identifier: &str) -> Result<Value, FetchError> {
        self.record("getPlayerProfile").await
    }

    async fn search_player(&self, _username: &str) -> Result<Value, FetchError> {
        self.record("searchPlayer").await
    }

    async fn player_match_history(&self, _identifier: &str) -> Result<Value, FetchError> {
        self.record("getPlayerMatchHistory").await
    }
}
