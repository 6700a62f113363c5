//! Reshaping of tabular results for chart consumers.
//!
//! [`chord_matrix`] turns a two-attribute, one-metric result into the square
//! matrix a chord diagram expects:
//!
//! ```text
//!  rows: [a1, b1, 3] [a1, b2, 4] [a2, b1, 5]
//!
//!  a1  [ 0, 0, 3, 4 ]
//!  a2  [ 0, 0, 5 ]
//!  b1  [ 3, 5, 0, 0 ]
//!  b2  [ 4, 0, 0 ]
//! ```
//!
//! Each attr1 key is `n1` zeros followed by its values; each attr2 key is its
//! values followed by `n2` zeros. Keys keep first-seen order.

use serde_json::Value;
use thiserror::Error;

use crate::execution::DataResult;

pub type ReshapeResult<T> = Result<T, ReshapeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    #[error("expected 3 headers (attribute, attribute, metric), found {0}")]
    MissingHeaders(usize),

    #[error("row {0} is not an array of at least 3 values")]
    MalformedRow(usize),

    #[error("row {row}: metric value '{value}' is not a number")]
    InvalidNumber { row: usize, value: String },
}

/// Build a chord matrix from `[attr1, attr2, metric]` rows.
pub fn chord_matrix(result: &DataResult) -> ReshapeResult<Vec<Vec<f64>>> {
    if result.headers.len() < 3 {
        return Err(ReshapeError::MissingHeaders(result.headers.len()));
    }

    let mut first: Vec<(String, Vec<f64>)> = Vec::new();
    let mut second: Vec<(String, Vec<f64>)> = Vec::new();

    for (index, row) in result.raw_data.iter().enumerate() {
        let cells = match row.as_array() {
            Some(cells) if cells.len() >= 3 => cells,
            _ => return Err(ReshapeError::MalformedRow(index)),
        };
        let value = metric_value(&cells[2]).ok_or_else(|| ReshapeError::InvalidNumber {
            row: index,
            value: cell_key(&cells[2]),
        })?;
        push_value(&mut first, cell_key(&cells[0]), value);
        push_value(&mut second, cell_key(&cells[1]), value);
    }

    let n1 = first.len();
    let n2 = second.len();
    let mut matrix = Vec::with_capacity(n1 + n2);
    for (_, values) in first {
        let mut row = vec![0.0; n1];
        row.extend(values);
        matrix.push(row);
    }
    for (_, mut values) in second {
        values.extend(std::iter::repeat(0.0).take(n2));
        matrix.push(values);
    }
    Ok(matrix)
}

fn push_value(groups: &mut Vec<(String, Vec<f64>)>, key: String, value: f64) {
    match groups.iter_mut().find(|(k, _)| *k == key) {
        Some((_, values)) => values.push(value),
        None => groups.push((key, vec![value])),
    }
}

fn cell_key(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn metric_value(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
