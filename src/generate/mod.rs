//! Identifier and expression synthesis for generated metrics.
//!
//! A generated metric is fully determined by its expression, title and format.
//! [`synthesize`] hashes those inputs into the identifier, so compiling the same
//! bucket description twice registers the same metrics on the platform.

mod error;
pub mod expression;
pub mod hash;
pub mod identifier;
pub mod title;

pub use error::{GenerateError, GenerateResult};
pub use expression::{base_expression, filter_clause, percent_expression, pop_expression, MetricRef};
pub use hash::content_hash;
pub use identifier::{generated_identifier, identifier_prefix, GeneratedKind};
pub use title::{percent_title, pop_title, truncate_title, MAX_TITLE_LENGTH, POP_SUFFIX};

use crate::model::{MeasureType, MetricDefinition};

/// Format of every percent-of-total metric.
pub const PERCENT_FORMAT: &str = "#,##0.00%";

/// Build a generated metric definition with a content-addressed identifier.
pub fn synthesize(
    source_type: MeasureType,
    object_uri: &str,
    kind: GeneratedKind,
    expression: String,
    title: String,
    format: String,
) -> GenerateResult<MetricDefinition> {
    let hash = content_hash(&expression, &title, &format);
    let identifier = generated_identifier(source_type, object_uri, kind, &hash)?;
    Ok(MetricDefinition {
        identifier,
        expression,
        title,
        format,
    })
}
