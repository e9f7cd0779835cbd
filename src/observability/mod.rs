//! Observability: structured logging to stderr.

pub mod logging;

pub use logging::init_logging;
