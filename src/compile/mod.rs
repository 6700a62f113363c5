//! Metadata object → execution configuration compiler.
//!
//! ```text
//! MetadataObject ─┬─ categories ──► columns, orderBy
//!                 ├─ measures ────► columns, definitions, orderBy   (generate::*)
//!                 └─ filters ─────► where
//! ```
//!
//! Compilation is pure and deterministic: the same input always yields
//! byte-identical columns, identifiers and expressions.
//!
//! # Example
//!
//! ```ignore
//! use mdexec::compile::compile;
//! use mdexec::model::MetadataObject;
//!
//! let md: MetadataObject = serde_json::from_str(source)?;
//! let config = compile(&md)?;
//! println!("{}", serde_json::to_string_pretty(&config)?);
//! ```

mod filters;
mod measures;
mod sort;

use tracing::debug;

use crate::generate::GenerateError;
use crate::model::{
    ExecutionConfiguration, ExecutionDefinition, MetadataObject, MetricDefinitionWrapper,
};

pub use filters::where_clause;
pub use measures::{plan_measure, DimensionContext, MeasurePlan};
pub use sort::order_by;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("measure '{measure}' is shown in percent but the first category has no attribute")]
    MissingPercentAttribute { measure: String },

    #[error("measure '{measure}' requests period-over-period but no date category has an attribute")]
    MissingPopAttribute { measure: String },

    #[error("date filter on '{dimension}' has only one bound")]
    IncompleteDateRange { dimension: String },

    #[error("attribute element URI has no id: {0}")]
    InvalidElementUri(String),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Compilation
// ============================================================================

/// Compile a metadata object into an execution configuration.
pub fn compile(md: &MetadataObject) -> CompileResult<ExecutionConfiguration> {
    let buckets = &md.buckets;
    let context = DimensionContext::from_buckets(buckets);

    let mut columns: Vec<String> = buckets
        .categories()
        .map(|c| c.display_form.clone())
        .collect();
    let mut definitions: Vec<MetricDefinitionWrapper> = Vec::new();
    let mut measure_sorts = Vec::new();

    for measure in buckets.measures() {
        let plan = plan_measure(measure, &context)?;
        debug!(
            measure = %measure.title,
            columns = plan.columns.len(),
            definitions = plan.definitions.len(),
            "planned measure"
        );
        columns.extend(plan.columns);
        definitions.extend(plan.definitions.into_iter().map(MetricDefinitionWrapper::from));
        measure_sorts.extend(plan.sort);
    }

    let where_clause = where_clause(&buckets.filters)?;
    let order_by = order_by(md, measure_sorts);

    debug!(
        columns = columns.len(),
        definitions = definitions.len(),
        filtered = where_clause.is_some(),
        "compiled execution configuration"
    );

    Ok(ExecutionConfiguration {
        columns,
        execution: ExecutionDefinition {
            definitions,
            where_clause,
            order_by,
        },
    })
}

/// Parse a JSON metadata object and compile it.
pub fn compile_json(source: &str) -> Result<ExecutionConfiguration, CompileJsonError> {
    let md: MetadataObject = serde_json::from_str(source)?;
    Ok(compile(&md)?)
}

/// Errors from [`compile_json`].
#[derive(Debug, thiserror::Error)]
pub enum CompileJsonError {
    #[error("invalid metadata object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),
}
