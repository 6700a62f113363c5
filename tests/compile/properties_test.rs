//! Structural properties that hold for any bucket description.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use mdexec::compile::compile;
use mdexec::generate::{MAX_TITLE_LENGTH, POP_SUFFIX};
use serde_json::json;

/// Identifier without its trailing content hash.
fn without_hash(identifier: &str) -> &str {
    identifier.rsplit_once('.').map_or(identifier, |(head, _)| head)
}

#[test]
fn test_one_column_per_category_and_measure_without_pop() {
    let md = report();
    let config = compile(&md).unwrap();

    assert_eq!(
        config.columns.len(),
        md.buckets.categories.len() + md.buckets.measures.len()
    );
}

#[test]
fn test_every_generated_column_has_a_definition() {
    let config = compile(&report()).unwrap();

    for column in config.columns.iter().filter(|c| c.contains(".generated.")) {
        assert!(config.definition(column).is_some(), "{column}");
    }
}

#[test]
fn test_compilation_is_deterministic() {
    let first = compile(&report()).unwrap();
    let second = compile(&report()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_filter_elements_change_only_the_hash() {
    let baseline = compile(&report()).unwrap();

    let mut md = report_json();
    md["buckets"]["measures"][0]["measure"]["measureFilters"][0]["listAttributeFilter"]["default"]
        ["attributeElements"] = json!([element(949, 1)]);
    let changed = compile(&metadata(md)).unwrap();

    let before = &baseline.columns[1];
    let after = &changed.columns[1];
    assert_ne!(before, after);
    assert_eq!(without_hash(before), without_hash(after));
    assert_eq!(baseline.columns[2..], changed.columns[2..]);
}

#[test]
fn test_percent_definitions_format_and_title() {
    for title in ["Sum of Amount", "% Sum of Amount"] {
        let mut measure = sum_of_amount();
        measure["title"] = json!(title);
        measure["showInPercent"] = json!(true);
        let config = compile(&single_measure(measure, "attribute", 1028, 1027)).unwrap();

        let percent = config
            .execution
            .definitions
            .iter()
            .map(|d| &d.metric_definition)
            .find(|d| d.identifier.contains(".generated.percent."))
            .unwrap();
        assert!(percent.format.ends_with(".00%"));
        assert!(percent.title.starts_with("% "));
        assert!(!percent.title.starts_with("% % "));
    }
}

#[test]
fn test_pop_definitions_title_suffix() {
    let long_title = "x".repeat(400);
    for title in ["Sum of Amount", long_title.as_str()] {
        let mut measure = sum_of_amount();
        measure["title"] = json!(title);
        measure["showPoP"] = json!(true);
        let config = compile(&single_measure(measure, "date", 1234, 1233)).unwrap();

        let pop = config
            .execution
            .definitions
            .iter()
            .map(|d| &d.metric_definition)
            .find(|d| d.identifier.contains(".generated.pop."))
            .unwrap();
        assert!(pop.title.ends_with(POP_SUFFIX));
        assert!(pop.title.chars().count() <= MAX_TITLE_LENGTH);
    }
}

#[test]
fn test_pop_measure_never_sorted() {
    let mut measure = sum_of_amount();
    measure["showPoP"] = json!(true);
    measure["sort"] = json!("desc");
    let config = compile(&single_measure(measure, "date", 1234, 1233)).unwrap();

    assert!(config.order_by().is_empty());
}

#[test]
fn test_where_omitted_without_restricting_filters() {
    let md = metadata(json!({
        "buckets": {
            "measures": [{"measure": sum_of_amount()}],
            "filters": [
                {"dateFilter": {"dimension": obj(16561), "granularity": "GDC.time.year"}},
                {"listAttributeFilter": {
                    "attribute": obj(1025),
                    "displayForm": obj(1028),
                    "default": {"negativeSelection": true, "attributeElements": []}
                }}
            ]
        }
    }));
    let config = compile(&md).unwrap();

    assert!(config.where_clause().is_none());
}
