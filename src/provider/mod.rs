//! Remote data provider surface.
//!
//! [`GameDataProvider`] is the fixed capability set the dispatcher invokes;
//! [`RivalsApiProvider`] implements it against the Marvel Rivals REST API.
//! The trait seam exists so the dispatcher can be exercised against a mock
//! provider without network access.

mod rivals;

pub use rivals::RivalsApiProvider;

use crate::fetch::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// One outbound endpoint call: path segments plus optional query parameters.
///
/// Immutable once built. Segments are percent-encoded when the URL is
/// constructed, so raw caller input (spaces, slashes) stays inside its own
/// segment.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl RemoteRequest {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Build the absolute URL by extending the base path. Tolerates a
    /// trailing slash on the base.
    pub fn url(&self, base: &Url) -> Result<Url, FetchError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::Network(format!("base URL cannot host paths: {base}")))?;
            path.pop_if_empty();
            for segment in &self.segments {
                path.push(segment);
            }
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

/// Fixed menu of remote operations the dispatcher can invoke.
///
/// Operations return the decoded JSON body as-is; the remote shape is not
/// re-validated. `hero_info` is composite: it merges two underlying calls.
#[async_trait]
pub trait GameDataProvider: Send + Sync {
    async fn list_heroes(&self) -> Result<Value, FetchError>;
    async fn hero_abilities(&self, identifier: &str) -> Result<Value, FetchError>;
    async fn hero_info(&self, identifier: &str) -> Result<Value, FetchError>;
    async fn hero_skins(&self, id: &str) -> Result<Value, FetchError>;

    async fn list_skins(&self) -> Result<Value, FetchError>;

    async fn list_achievements(&self) -> Result<Value, FetchError>;
    async fn search_achievement(&self, name: &str) -> Result<Value, FetchError>;

    async fn list_items(&self) -> Result<Value, FetchError>;
    async fn items_by_type(&self, item_type: &str) -> Result<Value, FetchError>;

    async fn list_maps(&self) -> Result<Value, FetchError>;
    async fn filter_maps(&self, filter: &str) -> Result<Value, FetchError>;

    async fn player_profile(&self, identifier: &str) -> Result<Value, FetchError>;
    async fn search_player(&self, username: &str) -> Result<Value, FetchError>;
    async fn player_match_history(&self, identifier: &str) -> Result<Value, FetchError>;
}
