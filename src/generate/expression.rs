//! MAQL expression synthesis.
//!
//! Grammar produced here:
//!
//! ```text
//! SELECT SUM([uri])
//! SELECT [uri] WHERE [attr] IN ([e1],[e2])
//! SELECT (SELECT {ref}) / (SELECT {ref} BY ALL [attr])
//! SELECT (SELECT {ref}) FOR PREVIOUS ([attr])
//! ```

use std::fmt;

use crate::model::{Aggregation, ListAttributeFilter, MeasureFilter};

/// Reference to a metric inside an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricRef {
    /// An existing platform object, written `[uri]`.
    Object(String),
    /// A metric generated in the same execution, written `{identifier}`.
    Generated(String),
}

impl MetricRef {
    /// The column identifier this reference resolves to.
    pub fn column(&self) -> &str {
        match self {
            MetricRef::Object(uri) => uri,
            MetricRef::Generated(id) => id,
        }
    }
}

impl fmt::Display for MetricRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricRef::Object(uri) => write!(f, "[{uri}]"),
            MetricRef::Generated(id) => write!(f, "{{{id}}}"),
        }
    }
}

/// Base expression of a measure over a raw object, including its measure filters.
pub fn base_expression(
    object_uri: &str,
    aggregation: Option<Aggregation>,
    filters: &[MeasureFilter],
) -> String {
    let mut expr = match aggregation {
        Some(agg) => format!("SELECT {}([{object_uri}])", agg.function_name()),
        None => format!("SELECT [{object_uri}]"),
    };

    let clauses: Vec<String> = filters
        .iter()
        .filter_map(|f| filter_clause(&f.list_attribute_filter))
        .collect();
    if !clauses.is_empty() {
        expr.push_str(" WHERE ");
        expr.push_str(&clauses.join(" AND "));
    }
    expr
}

/// `[attr] IN ([e1],[e2])`, or `NOT IN` for a negative selection.
/// `None` when the filter selects no elements.
pub fn filter_clause(filter: &ListAttributeFilter) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    let elements: Vec<String> = filter.elements().iter().map(|e| format!("[{e}]")).collect();
    let negation = if filter.is_negative() { "NOT " } else { "" };
    Some(format!(
        "[{}] {negation}IN ({})",
        filter.attribute,
        elements.join(",")
    ))
}

/// Share of `inner` in its total across all values of `attribute`.
pub fn percent_expression(inner: &MetricRef, attribute: &str) -> String {
    format!("SELECT (SELECT {inner}) / (SELECT {inner} BY ALL [{attribute}])")
}

/// Value of `inner` in the previous period of `attribute`.
pub fn pop_expression(inner: &MetricRef, attribute: &str) -> String {
    format!("SELECT (SELECT {inner}) FOR PREVIOUS ([{attribute}])")
}
