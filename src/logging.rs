//! `tracing` subscriber bootstrap.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::ParseError, fmt};

/// Subscriber installation failure.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive does not parse.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Installs a stderr `fmt` subscriber.
///
/// `directive` wins when given; otherwise `RUST_LOG`, otherwise `fallback`.
pub fn init_logging(directive: Option<&str>, fallback: &str) -> Result<(), LoggingError> {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(LoggingError::Install)
}
