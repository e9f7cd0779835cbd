//! Structured logging system using tracing crate
//!
//! Everything is written to stderr: stdout belongs to the MCP protocol
//! stream, and a stray log line there would corrupt a frame.
//!
//! ## Environment Variables
//!
//! - `LOG_FORMAT`: `json` (default) or `pretty`
//! - `RUST_LOG`: overrides the verbosity chosen on the command line

use std::env;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global subscriber.
///
/// `verbosity` is the CLI `-v` count: 0 = info, 1 = debug, 2+ = trace.
pub fn init_logging(verbosity: u8) {
    let level = verbosity_level(verbosity);

    let mut filter = EnvFilter::new(level.to_string())
        // Reduce noise from dependencies
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap())
        .add_directive("tokio=warn".parse().unwrap());

    // Allow RUST_LOG to override
    if let Ok(rust_log) = env::var("RUST_LOG") {
        filter = EnvFilter::new(rust_log);
    }

    let subscriber = tracing_subscriber::registry().with(filter);

    match env::var("LOG_FORMAT").as_deref() {
        Ok("pretty") => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(true)
                .with_writer(std::io::stderr);
            subscriber.with(fmt_layer).init();
        }
        _ => {
            let fmt_layer = fmt::layer().json().with_writer(std::io::stderr);
            subscriber.with(fmt_layer).init();
        }
    }
}

fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(verbosity_level(0), Level::INFO);
        assert_eq!(verbosity_level(1), Level::DEBUG);
        assert_eq!(verbosity_level(2), Level::TRACE);
        assert_eq!(verbosity_level(9), Level::TRACE);
    }
}
