//! MCP server entry point.
//!
//! Thin bootstrap: parse the CLI, initialize logging, load configuration,
//! wire the provider into the stdio server. Everything interesting lives
//! in the library.

use clap::Parser;
use mcp_rivals::config::ServerConfig;
use mcp_rivals::observability::init_logging;
use mcp_rivals::provider::RivalsApiProvider;
use mcp_rivals::server::McpServer;
use mcp_rivals::ConfigError;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// MCP server exposing the Marvel Rivals statistics API as tools
#[derive(Parser)]
#[command(name = "mcp-rivals")]
#[command(about = "MCP server for the Marvel Rivals statistics API")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Remote API base URL (overrides the configuration file)
    #[arg(long, env = "RIVALS_API_URL")]
    base_url: Option<String>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match load_configuration(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let provider = match RivalsApiProvider::new(&config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to initialize provider: {e}");
            process::exit(1);
        }
    };

    info!(
        base_url = %config.api.base_url,
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = McpServer::new(provider).run_stdio().await {
        error!("Server error: {e}");
        process::exit(1);
    }
}

fn load_configuration(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ServerConfig::load_from_file(path)?
        }
        None => ServerConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    Ok(config)
}
