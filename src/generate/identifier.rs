//! Generated metric identifiers.
//!
//! Format: `{sourceType}_{projectId}_{objectId}.generated.{kind}.{contentHash}`, e.g.
//! `fact_qamfsd9cw85e53mcqs74k8a0mwbf5gc2_1144.generated.filtered_sum.b9f95d95...`.

use std::fmt;

use crate::model::{Aggregation, MeasureType, ObjectRef};

use super::error::{GenerateError, GenerateResult};

/// Which rule produced a generated metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKind {
    /// Measure over a raw object: `sum`, `count`, ... or `base` without aggregation.
    Base(Option<Aggregation>),
    /// Same, restricted by measure filters: `filtered_sum`, ..., `filtered_base`.
    Filtered(Option<Aggregation>),
    Percent,
    Pop,
}

impl fmt::Display for GeneratedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn agg_name(agg: &Option<Aggregation>) -> &'static str {
            agg.as_ref().map_or("base", Aggregation::as_str)
        }
        match self {
            GeneratedKind::Base(agg) => f.write_str(agg_name(agg)),
            GeneratedKind::Filtered(agg) => write!(f, "filtered_{}", agg_name(agg)),
            GeneratedKind::Percent => f.write_str("percent"),
            GeneratedKind::Pop => f.write_str("pop"),
        }
    }
}

/// `{sourceType}_{projectId}_{objectId}` prefix shared by every metric generated from one object.
pub fn identifier_prefix(source_type: MeasureType, object_uri: &str) -> GenerateResult<String> {
    let object = ObjectRef::parse(object_uri)
        .ok_or_else(|| GenerateError::InvalidObjectUri(object_uri.to_string()))?;
    Ok(format!(
        "{}_{}_{}",
        source_type.as_str(),
        object.project_id,
        object.object_id
    ))
}

pub fn generated_identifier(
    source_type: MeasureType,
    object_uri: &str,
    kind: GeneratedKind,
    hash: &str,
) -> GenerateResult<String> {
    let prefix = identifier_prefix(source_type, object_uri)?;
    Ok(format!("{prefix}.generated.{kind}.{hash}"))
}
