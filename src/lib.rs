//! MCP server for the Marvel Rivals statistics API.
//!
//! Exposes the public game-statistics REST API as Model Context Protocol
//! tools over stdio. The crate is organized as a small pipeline:
//!
//! - [`fetch`] - single-attempt HTTP transport plus bounded retry/backoff
//! - [`scheduler`] - FIFO admission gate (concurrency cap + rolling rate cap)
//! - [`provider`] - the fixed menu of remote operations built on the above
//! - [`tools`] - dispatcher translating invocations into the result envelope
//! - [`server`] - newline-delimited JSON-RPC 2.0 over stdin/stdout
//!
//! # Quick Start
//!
//! ```no_run
//! use mcp_rivals::config::ServerConfig;
//! use mcp_rivals::provider::RivalsApiProvider;
//! use mcp_rivals::server::McpServer;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::default();
//! let provider = RivalsApiProvider::new(&config)?;
//! McpServer::new(provider).run_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetch;
pub mod observability;
pub mod provider;
pub mod scheduler;
pub mod server;
pub mod testing;
pub mod tools;

pub use config::{ConfigError, ServerConfig};
pub use fetch::FetchError;
pub use provider::{GameDataProvider, RivalsApiProvider};
pub use scheduler::{RequestScheduler, SchedulerConfig};
pub use server::McpServer;
pub use tools::{ToolDispatcher, ToolError, ToolResult};
