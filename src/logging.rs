//! Tracing subscriber setup for the binary.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Filter from `RUST_LOG` when set, otherwise from the configured level.
pub fn filter(settings: &LoggingSettings) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&settings.level)?),
    }
}

/// Install a global subscriber writing to stderr, so stdout stays clean for results.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(filter(settings)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}
