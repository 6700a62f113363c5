//! Execution-specific error types.

use thiserror::Error;

use crate::config::SettingsError;

/// Result type for execution operations.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Errors that can occur while executing a report on the platform.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The create-execution request returned a non-2xx status.
    #[error("execution failed with HTTP status {status}")]
    ExecutionFailed { status: u16 },

    /// Retrieving the tabular result returned a non-2xx status.
    #[error("data result failed with HTTP status {status}")]
    DataResultFailed { status: u16 },

    /// The execution response did not contain a tabular result handle.
    #[error("execution response has no tabularDataResult handle")]
    MissingResultHandle,

    /// The result was still being computed after the last poll attempt.
    #[error("data result not ready after {attempts} attempts")]
    PollTimeout { attempts: u32 },

    /// Platform settings could not be resolved.
    #[error("configuration error: {0}")]
    Config(#[from] SettingsError),

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize the request body.
    #[error("failed to serialize request: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Failed to deserialize the execution response.
    #[error("failed to deserialize response: {0}")]
    DeserializeFailed(#[source] serde_json::Error),
}

impl ExecutionError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ExecutionFailed { status } | Self::DataResultFailed { status } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
