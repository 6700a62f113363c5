//! Chord matrix reshaping of two-attribute results.

use mdexec::execution::{DataResult, Header, HeaderType};
use mdexec::reshape::{chord_matrix, ReshapeError};
use serde_json::{json, Value};

fn header(id: &str, header_type: HeaderType) -> Header {
    Header {
        id: id.to_string(),
        uri: None,
        header_type,
        title: id.to_string(),
    }
}

fn result(rows: Vec<Value>) -> DataResult {
    DataResult {
        headers: vec![
            header("label.region", HeaderType::AttrLabel),
            header("label.product", HeaderType::AttrLabel),
            header("metric.revenue", HeaderType::Metric),
        ],
        raw_data: rows,
        is_empty: false,
    }
}

#[test]
fn test_chord_matrix_layout() {
    let matrix = chord_matrix(&result(vec![
        json!(["East", "Shoes", "3"]),
        json!(["East", "Hats", "4"]),
        json!(["West", "Shoes", 5]),
    ]))
    .unwrap();

    assert_eq!(
        matrix,
        vec![
            vec![0.0, 0.0, 3.0, 4.0],
            vec![0.0, 0.0, 5.0],
            vec![3.0, 5.0, 0.0, 0.0],
            vec![4.0, 0.0, 0.0],
        ]
    );
}

#[test]
fn test_keys_keep_first_seen_order() {
    let matrix = chord_matrix(&result(vec![
        json!(["b", "y", "1"]),
        json!(["a", "x", "2"]),
    ]))
    .unwrap();

    // "b" and "y" come first because they were seen first.
    assert_eq!(matrix[0], vec![0.0, 0.0, 1.0]);
    assert_eq!(matrix[1], vec![0.0, 0.0, 2.0]);
    assert_eq!(matrix[2], vec![1.0, 0.0, 0.0]);
    assert_eq!(matrix[3], vec![2.0, 0.0, 0.0]);
}

#[test]
fn test_empty_result() {
    assert!(chord_matrix(&result(Vec::new())).unwrap().is_empty());
}

#[test]
fn test_requires_three_headers() {
    let mut data = result(Vec::new());
    data.headers.truncate(2);

    assert_eq!(chord_matrix(&data), Err(ReshapeError::MissingHeaders(2)));
}

#[test]
fn test_rejects_malformed_rows() {
    assert_eq!(
        chord_matrix(&result(vec![json!(["a", "x", "1"]), json!(["a", "x"])])),
        Err(ReshapeError::MalformedRow(1))
    );
    assert_eq!(
        chord_matrix(&result(vec![json!("a")])),
        Err(ReshapeError::MalformedRow(0))
    );
}

#[test]
fn test_rejects_non_numeric_metric() {
    assert_eq!(
        chord_matrix(&result(vec![json!(["a", "x", "n/a"])])),
        Err(ReshapeError::InvalidNumber {
            row: 0,
            value: "n/a".to_string()
        })
    );
}
