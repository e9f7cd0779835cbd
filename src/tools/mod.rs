//! Tool dispatcher: the protocol-facing surface of the server.
//!
//! Holds the static registry of operations, validates incoming
//! invocations, and translates every outcome into the uniform content
//! envelope. This is the only layer that produces user-facing text; typed
//! errors from the layers below stop here and are logged here.

mod registry;

use crate::fetch::FetchError;
use crate::provider::GameDataProvider;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// One entry in the advertised tool menu.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A single content block inside a [`ToolResult`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Uniform invocation envelope.
///
/// Carries either the pretty-printed result payload or an `Error: ...`
/// text; `is_error` mirrors which of the two it is.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error: None,
        }
    }

    fn error(message: impl std::fmt::Display) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: format!("Error: {message}"),
            }],
            is_error: Some(true),
        }
    }

    /// Text of the first content block.
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(ToolContent::Text { text }) => text,
            None => "",
        }
    }

    /// True when the envelope carries an error.
    pub fn failed(&self) -> bool {
        self.is_error == Some(true)
    }
}

/// Dispatcher-level failures, rendered into the error envelope
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Missing required argument: {0}")]
    MissingArgument(String),
    #[error("Argument {0} must be a string")]
    InvalidArgument(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Validates invocations and routes them to the provider.
pub struct ToolDispatcher<P> {
    provider: P,
}

impl<P: GameDataProvider> ToolDispatcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Advertised operation menu. The names here and the names accepted by
    /// [`invoke`](Self::invoke) come from the same registry.
    pub fn list_tools(&self) -> Vec<ToolDescription> {
        registry::all().iter().map(|spec| spec.describe()).collect()
    }

    /// Validate and execute one invocation.
    ///
    /// Every failure, including unknown names and provider errors, comes
    /// back as an error envelope; nothing propagates past this boundary.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> ToolResult {
        match self.dispatch(name, arguments).await {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => ToolResult::success(text),
                Err(e) => {
                    error!(tool = name, error = %e, "Failed to serialize tool result");
                    ToolResult::error(e)
                }
            },
            Err(e) => {
                error!(tool = name, arguments = %arguments, error = %e, "Tool execution failed");
                ToolResult::error(e)
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        let spec =
            registry::find(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        // Shape-check required arguments before any network work.
        for required in spec.required {
            require_str(arguments, required)?;
        }

        let result = match name {
            "listHeroes" => self.provider.list_heroes().await,
            "getHeroAbilities" => {
                self.provider
                    .hero_abilities(require_str(arguments, "identifier")?)
                    .await
            }
            "getHeroInfo" => {
                self.provider
                    .hero_info(require_str(arguments, "identifier")?)
                    .await
            }
            "getHeroSkins" => self.provider.hero_skins(require_str(arguments, "id")?).await,
            "listSkins" => self.provider.list_skins().await,
            "listAchievements" => self.provider.list_achievements().await,
            "searchAchievement" => {
                self.provider
                    .search_achievement(require_str(arguments, "name")?)
                    .await
            }
            "listItems" => self.provider.list_items().await,
            "getItemsByType" => {
                self.provider
                    .items_by_type(require_str(arguments, "type")?)
                    .await
            }
            "listMaps" => self.provider.list_maps().await,
            "filterMaps" => {
                self.provider
                    .filter_maps(require_str(arguments, "filter")?)
                    .await
            }
            "getPlayerProfile" => {
                self.provider
                    .player_profile(require_str(arguments, "identifier")?)
                    .await
            }
            "searchPlayer" => {
                self.provider
                    .search_player(require_str(arguments, "username")?)
                    .await
            }
            "getPlayerMatchHistory" => {
                self.provider
                    .player_match_history(require_str(arguments, "identifier")?)
                    .await
            }
            _ => return Err(ToolError::UnknownTool(name.to_string())),
        };

        result.map_err(ToolError::from)
    }
}

/// Fetch a required string argument from the invocation payload.
fn require_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    match arguments.get(key) {
        None | Some(Value::Null) => Err(ToolError::MissingArgument(key.to_string())),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ToolError::InvalidArgument(key.to_string())),
    }
}
