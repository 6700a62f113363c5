//! Execution configuration types.
//!
//! These mirror the platform's execution contract; field names and nesting are
//! fixed by the platform and must serialize exactly as shown:
//!
//! ```json
//! {
//!   "columns": ["/gdc/md/prj/obj/1028", "fact_prj_1144.generated.sum.7537..."],
//!   "execution": {
//!     "definitions": [{"metricDefinition": {"identifier": "...", "expression": "...",
//!                      "title": "...", "format": "..."}}],
//!     "where": {"/gdc/md/prj/obj/1028": {"$in": [{"id": 1243}]}},
//!     "orderBy": [{"column": "/gdc/md/prj/obj/1028", "direction": "asc"}]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::model::types::SortDirection;

/// Filter predicate keyed by column (display form or date dimension URI).
pub type WhereClause = serde_json::Map<String, serde_json::Value>;

/// Output of the metadata compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfiguration {
    pub columns: Vec<String>,
    pub execution: ExecutionDefinition,
}

impl ExecutionConfiguration {
    /// Look up a generated definition by identifier.
    pub fn definition(&self, identifier: &str) -> Option<&MetricDefinition> {
        self.execution
            .definitions
            .iter()
            .map(|d| &d.metric_definition)
            .find(|d| d.identifier == identifier)
    }

    pub fn where_clause(&self) -> Option<&WhereClause> {
        self.execution.where_clause.as_ref()
    }

    pub fn order_by(&self) -> &[OrderBy] {
        &self.execution.order_by
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDefinition {
    #[serde(default)]
    pub definitions: Vec<MetricDefinitionWrapper>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<WhereClause>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
}

/// Wire wrapper: `{"metricDefinition": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinitionWrapper {
    pub metric_definition: MetricDefinition,
}

impl From<MetricDefinition> for MetricDefinitionWrapper {
    fn from(metric_definition: MetricDefinition) -> Self {
        Self { metric_definition }
    }
}

/// A generated metric, registered on the fly by the platform under `identifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub identifier: String,
    pub expression: String,
    pub title: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}
