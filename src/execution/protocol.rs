//! Wire types for the execution endpoints.
//!
//! - `POST /gdc/internal/projects/{project}/experimental/executions` with an
//!   [`ExecutionRequest`], answered by an [`ExecutionResponse`].
//! - `GET {tabularDataResult}` answered by `{"tabularDataResult": {"values": [...]}}`,
//!   `202` while computing, or `204`/no body for an empty result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{MetricDefinitionWrapper, OrderBy, WhereClause};

/// Path of the create-execution endpoint.
pub fn executions_path(project_id: &str) -> String {
    format!("/gdc/internal/projects/{project_id}/experimental/executions")
}

// ============================================================================
// Request
// ============================================================================

/// Optional parts of an execution, passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionOptions {
    /// Execution-context filters.
    pub filters: Option<Value>,
    pub order_by: Option<Vec<OrderBy>>,
    pub definitions: Option<Vec<MetricDefinitionWrapper>>,
    /// Query-language filters, e.g. `{"label.attr.city": {"$eq": 1}}`.
    pub where_clause: Option<WhereClause>,
}

impl ExecutionOptions {
    pub fn with_filters(mut self, filters: Value) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_order_by(mut self, order_by: Vec<OrderBy>) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_definitions(mut self, definitions: Vec<MetricDefinitionWrapper>) -> Self {
        self.definitions = Some(definitions);
        self
    }

    pub fn with_where(mut self, where_clause: WhereClause) -> Self {
        self.where_clause = Some(where_clause);
        self
    }
}

/// Body of the create-execution request.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRequest {
    pub execution: ExecutionBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionBody {
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<OrderBy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<MetricDefinitionWrapper>>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<WhereClause>,
}

impl ExecutionRequest {
    pub fn new(columns: Vec<String>, options: ExecutionOptions) -> Self {
        Self {
            execution: ExecutionBody {
                columns,
                filters: options.filters,
                order_by: options.order_by,
                definitions: options.definitions,
                where_clause: options.where_clause,
            },
        }
    }
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub execution_result: ExecutionResultEnvelope,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResultEnvelope {
    #[serde(default)]
    pub columns: Vec<ResultColumn>,
    /// Ready-made headers; preferred over `columns` when present.
    #[serde(default)]
    pub headers: Option<Vec<Header>>,
    /// URI of the tabular result.
    #[serde(default)]
    pub tabular_data_result: Option<String>,
}

/// Column metadata: exactly one of the two variants is populated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultColumn {
    #[serde(default)]
    pub attribute_display_form: Option<ColumnObject>,
    #[serde(default)]
    pub metric: Option<ColumnObject>,
}

impl ResultColumn {
    pub fn header_type(&self) -> Option<HeaderType> {
        if self.attribute_display_form.is_some() {
            Some(HeaderType::AttrLabel)
        } else if self.metric.is_some() {
            Some(HeaderType::Metric)
        } else {
            None
        }
    }

    pub fn meta(&self) -> Option<&ObjectMeta> {
        self.attribute_display_form
            .as_ref()
            .or(self.metric.as_ref())
            .map(|o| &o.meta)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnObject {
    #[serde(default)]
    pub meta: ObjectMeta,
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

// ============================================================================
// Result exposed to callers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderType {
    AttrLabel,
    Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "type")]
    pub header_type: HeaderType,
    #[serde(default)]
    pub title: String,
}

/// Headers plus raw rows of an executed report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResult {
    pub headers: Vec<Header>,
    pub raw_data: Vec<Value>,
    /// The platform answered 204: the execution produced no data.
    pub is_empty: bool,
}

/// Rows of a tabular result body, or nothing when the body has no values.
pub fn tabular_values(body: &str) -> Option<Vec<Value>> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("tabularDataResult")?.get("values")? {
        Value::Array(values) => Some(values.clone()),
        _ => None,
    }
}
