//! MCP stdio server.
//!
//! Speaks newline-delimited JSON-RPC 2.0 on stdin/stdout: `initialize`,
//! `tools/list`, and `tools/call`, plus the protocol niceties around them.
//! Stdout carries protocol frames only; all logging goes to stderr. The
//! loop ends at stdin EOF, letting in-flight work finish naturally.

pub mod protocol;

use crate::provider::GameDataProvider;
use crate::tools::ToolDispatcher;
use protocol::{JsonRpcRequest, JsonRpcResponse};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Serves the tool dispatcher over stdio.
pub struct McpServer<P> {
    dispatcher: ToolDispatcher<P>,
}

impl<P: GameDataProvider> McpServer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            dispatcher: ToolDispatcher::new(provider),
        }
    }

    /// Read frames from stdin and answer on stdout until EOF.
    pub async fn run_stdio(&self) -> std::io::Result<()> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();
        let mut stdout = tokio::io::stdout();

        info!("MCP server started");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(&line).await {
                let mut frame =
                    serde_json::to_vec(&response).map_err(std::io::Error::other)?;
                frame.push(b'\n');
                stdout.write_all(&frame).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Decode one frame and produce its response, if one is owed.
    ///
    /// Notifications return `None`. Exposed so the codec can be driven
    /// without wiring up real stdio.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Discarding malformed frame");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    protocol::PARSE_ERROR,
                    "Parse error",
                ));
            }
        };

        let id = request.id?;

        Some(match self.handle_method(&request.method, &request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::error(id, code, message),
        })
    }

    async fn handle_method(
        &self,
        method: &str,
        params: &Value,
    ) -> Result<Value, (i64, String)> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": protocol::PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({"tools": self.dispatcher.list_tools()})),
            "tools/call" => {
                let name = params
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        (
                            protocol::INVALID_PARAMS,
                            "tools/call requires a tool name".to_string(),
                        )
                    })?;
                let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

                let result = self.dispatcher.invoke(name, &arguments).await;
                serde_json::to_value(result)
                    .map_err(|e| (protocol::INTERNAL_ERROR, e.to_string()))
            }
            _ => Err((
                protocol::METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            )),
        }
    }
}
