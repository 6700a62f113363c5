//! Where-clause construction from report filters.

use serde_json::{json, Value};
use tracing::debug;

use crate::model::{element_id, DateFilter, FilterEntry, ListAttributeFilter, WhereClause};

use super::{CompileError, CompileResult};

/// Build the where clause, or `None` when no filter restricts anything.
///
/// Filters that select everything are dropped rather than encoded: all-time date
/// filters and attribute filters with an empty element list.
pub fn where_clause(filters: &[FilterEntry]) -> CompileResult<Option<WhereClause>> {
    let mut clause = WhereClause::new();

    for filter in filters {
        let entry = match filter {
            FilterEntry::ListAttributeFilter(f) => attribute_condition(f)?,
            FilterEntry::DateFilter(f) => date_condition(f)?,
        };
        if let Some((column, condition)) = entry {
            clause.insert(column, condition);
        }
    }

    Ok((!clause.is_empty()).then_some(clause))
}

fn attribute_condition(filter: &ListAttributeFilter) -> CompileResult<Option<(String, Value)>> {
    if filter.is_empty() {
        // Negated-empty means "all selected"; a positive empty selection is elided too.
        debug!(
            display_form = %filter.display_form,
            all_selected = filter.is_all_selected(),
            "skipping attribute filter without elements"
        );
        return Ok(None);
    }

    let ids = filter
        .elements()
        .iter()
        .map(|uri| {
            element_id(uri)
                .map(|id| json!({ "id": id_value(id) }))
                .ok_or_else(|| CompileError::InvalidElementUri(uri.clone()))
        })
        .collect::<CompileResult<Vec<_>>>()?;

    let condition = if filter.is_negative() {
        json!({ "$not": { "$in": ids } })
    } else {
        json!({ "$in": ids })
    };
    Ok(Some((filter.display_form.clone(), condition)))
}

fn date_condition(filter: &DateFilter) -> CompileResult<Option<(String, Value)>> {
    match (filter.from, filter.to) {
        (Some(from), Some(to)) => Ok(Some((
            filter.dimension.clone(),
            json!({ "$between": [from, to], "$granularity": filter.granularity }),
        ))),
        (None, None) => {
            debug!(dimension = %filter.dimension, "skipping all-time date filter");
            Ok(None)
        }
        _ => Err(CompileError::IncompleteDateRange {
            dimension: filter.dimension.clone(),
        }),
    }
}

/// Numeric ids are sent as numbers, anything else as a string.
fn id_value(id: &str) -> Value {
    id.parse::<i64>().map_or_else(|_| Value::from(id), Value::from)
}
