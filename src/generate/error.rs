//! Synthesizer errors.

use thiserror::Error;

pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The object URI does not have the `/gdc/md/{project}/obj/{id}` shape.
    #[error("invalid object URI: {0}")]
    InvalidObjectUri(String),
}
