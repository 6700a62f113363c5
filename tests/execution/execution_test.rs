//! Execution requester against a scripted transport.

#[path = "../common/mod.rs"]
mod common;

use mdexec::compile::compile;
use mdexec::config::PollSettings;
use mdexec::execution::test_utils::ScriptedTransport;
use mdexec::execution::{ExecutionClient, ExecutionError, ExecutionOptions, HeaderType};
use mdexec::model::{MetricDefinition, MetricDefinitionWrapper, OrderBy, SortDirection, WhereClause};
use serde_json::{json, Value};

const PROJECT: &str = "myFakeProjectId";
const EXECUTIONS: &str = "/gdc/internal/projects/myFakeProjectId/experimental/executions";
const RESULT: &str = "/gdc/internal/projects/myFakeProjectId/experimental/executions/23452345";

fn execution_response() -> Value {
    json!({
        "executionResult": {
            "columns": [
                {"attributeDisplayForm": {"meta": {"identifier": "attrId", "uri": "attrUri", "title": "Df Title"}}},
                {"metric": {
                    "meta": {"identifier": "metricId", "uri": "metricUri", "title": "Metric Title"},
                    "content": {"format": "#00"}
                }}
            ],
            "tabularDataResult": RESULT
        }
    })
}

fn ids() -> Vec<String> {
    vec!["attrId".to_string(), "metricId".to_string()]
}

fn tabular(values: Value) -> Value {
    json!({"tabularDataResult": {"values": values}})
}

/// Body of the create-execution request sent by `client`.
fn request_body(client: &ExecutionClient<ScriptedTransport>) -> Value {
    let requests = client.transport().requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, EXECUTIONS);
    requests[0].body.clone().unwrap()
}

#[tokio::test]
async fn test_headers_built_from_columns() {
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond_json(201, &tabular(json!(["a", 1])));
    let client = ExecutionClient::new(transport);

    let result = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap();

    assert_eq!(result.headers.len(), 2);
    assert_eq!(result.headers[0].id, "attrId");
    assert_eq!(result.headers[0].uri.as_deref(), Some("attrUri"));
    assert_eq!(result.headers[0].header_type, HeaderType::AttrLabel);
    assert_eq!(result.headers[0].title, "Df Title");
    assert_eq!(result.headers[1].id, "metricId");
    assert_eq!(result.headers[1].uri.as_deref(), Some("metricUri"));
    assert_eq!(result.headers[1].header_type, HeaderType::Metric);
    assert_eq!(result.headers[1].title, "Metric Title");
    assert_eq!(result.raw_data, vec![json!("a"), json!(1)]);

    let requests = client.transport().requests();
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, RESULT);
}

#[tokio::test]
async fn test_headers_taken_from_response() {
    let mut response = execution_response();
    response["executionResult"]["headers"] = json!([
        {"id": "attrId", "title": "Atribute Title", "type": "attrLabel", "uri": "attrUri"},
        {"id": "metricId", "title": "Metric Title", "type": "metric", "uri": "metricUri"}
    ]);
    let transport = ScriptedTransport::new()
        .respond_json(200, &response)
        .respond_json(201, &tabular(json!(["a", 1])));
    let client = ExecutionClient::new(transport);

    let result = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap();

    assert_eq!(result.headers[0].title, "Atribute Title");
    assert_eq!(result.headers[0].header_type, HeaderType::AttrLabel);
    assert_eq!(result.headers[1].header_type, HeaderType::Metric);
    assert_eq!(result.raw_data, vec![json!("a"), json!(1)]);
}

#[tokio::test]
async fn test_missing_tabular_data_yields_empty_rows() {
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond_json(200, &json!("TEMPORARY_HACK"));
    let client = ExecutionClient::new(transport);

    let result = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap();

    assert!(result.raw_data.is_empty());
    assert!(!result.is_empty);
}

#[tokio::test]
async fn test_no_content_marks_result_empty() {
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond(204, "");
    let client = ExecutionClient::new(transport);

    let result = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap();

    assert!(result.raw_data.is_empty());
    assert!(result.is_empty);
    assert_eq!(
        serde_json::to_value(&result).unwrap()["isEmpty"],
        json!(true)
    );
}

#[tokio::test]
async fn test_rejects_when_execution_fails() {
    let transport = ScriptedTransport::new().respond(400, "");
    let client = ExecutionClient::new(transport);

    let err = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::ExecutionFailed { status: 400 }));
    assert_eq!(client.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_rejects_when_data_result_fails() {
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond_json(400, &tabular(json!(["a", 1])));
    let client = ExecutionClient::new(transport);

    let err = client
        .get_data(PROJECT, &["/metric/uri".to_string()], ExecutionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::DataResultFailed { status: 400 }));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_propagates_execution_context_filters() {
    let filters = json!([{
        "uri": "/gdc/md/myFakeProjectId/obj/1",
        "constraint": {"type": "list", "elements": ["/gdc/md/myFakeProjectId/obj/1/elements?id=1"]}
    }]);
    let client = ExecutionClient::new(ScriptedTransport::new().respond(400, ""));

    let _ = client
        .get_data(
            PROJECT,
            &ids(),
            ExecutionOptions::default().with_filters(filters.clone()),
        )
        .await;

    let body = request_body(&client);
    assert_eq!(body["execution"]["filters"], filters);
    assert_eq!(body["execution"]["columns"], json!(["attrId", "metricId"]));
    assert!(body["execution"].get("orderBy").is_none());
}

#[tokio::test]
async fn test_propagates_order_by() {
    let order_by = vec![
        OrderBy::new("column1", SortDirection::Asc),
        OrderBy::new("column2", SortDirection::Desc),
    ];
    let client = ExecutionClient::new(ScriptedTransport::new().respond(400, ""));

    let _ = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default().with_order_by(order_by))
        .await;

    assert_eq!(
        request_body(&client)["execution"]["orderBy"],
        json!([
            {"column": "column1", "direction": "asc"},
            {"column": "column2", "direction": "desc"}
        ])
    );
}

#[tokio::test]
async fn test_propagates_definitions() {
    let definitions = vec![MetricDefinitionWrapper::from(MetricDefinition {
        identifier: "adyRSiRTdnMD.generated.pop.1fac4f897bbb5994a257cd2c9f0a81a4".to_string(),
        expression: "SELECT (SELECT {adyRSiRTdnMD}) FOR PREVIOUS ({date.year})".to_string(),
        title: "Closed Pipeline - previous year".to_string(),
        format: "#,,.00M".to_string(),
    })];
    let client = ExecutionClient::new(ScriptedTransport::new().respond(400, ""));

    let _ = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default().with_definitions(definitions))
        .await;

    assert_eq!(
        request_body(&client)["execution"]["definitions"],
        json!([{"metricDefinition": {
            "identifier": "adyRSiRTdnMD.generated.pop.1fac4f897bbb5994a257cd2c9f0a81a4",
            "expression": "SELECT (SELECT {adyRSiRTdnMD}) FOR PREVIOUS ({date.year})",
            "title": "Closed Pipeline - previous year",
            "format": "#,,.00M"
        }}])
    );
}

#[tokio::test]
async fn test_propagates_query_language_filters() {
    let mut where_clause = WhereClause::new();
    where_clause.insert("label.attr.city".to_string(), json!({"$eq": 1}));
    let client = ExecutionClient::new(ScriptedTransport::new().respond(400, ""));

    let _ = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default().with_where(where_clause))
        .await;

    assert_eq!(
        request_body(&client)["execution"]["where"],
        json!({"label.attr.city": {"$eq": 1}})
    );
}

#[tokio::test]
async fn test_polls_while_accepted() {
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond(202, "")
        .respond_json(200, &tabular(json!([["a", "1"]])));
    let client = ExecutionClient::new(transport).with_poll(PollSettings {
        interval_ms: 1,
        max_attempts: 3,
    });

    let result = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap();

    assert_eq!(result.raw_data, vec![json!(["a", "1"])]);
    let paths: Vec<_> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec![EXECUTIONS, RESULT, RESULT]);
}

#[tokio::test]
async fn test_poll_gives_up_after_max_attempts() {
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond(202, "")
        .respond(202, "")
        .respond(202, "");
    let client = ExecutionClient::new(transport).with_poll(PollSettings {
        interval_ms: 0,
        max_attempts: 3,
    });

    let err = client
        .get_data(PROJECT, &ids(), ExecutionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::PollTimeout { attempts: 3 }));
}

#[tokio::test]
async fn test_execute_sends_compiled_configuration() {
    let config = compile(&common::report()).unwrap();
    let transport = ScriptedTransport::new()
        .respond_json(200, &execution_response())
        .respond_json(200, &tabular(json!([])));
    let client = ExecutionClient::new(transport);

    client.execute(PROJECT, &config).await.unwrap();

    let body = request_body(&client);
    let execution = &body["execution"];
    assert_eq!(execution["columns"], serde_json::to_value(&config.columns).unwrap());
    assert_eq!(
        execution["definitions"],
        serde_json::to_value(&config.execution.definitions).unwrap()
    );
    assert_eq!(
        execution["where"],
        serde_json::to_value(config.where_clause().unwrap()).unwrap()
    );
    assert_eq!(
        execution["orderBy"],
        serde_json::to_value(config.order_by()).unwrap()
    );
    assert!(execution.get("filters").is_none());
}
