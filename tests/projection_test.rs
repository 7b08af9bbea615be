use ataix_cli::api_client::FetchError;
use ataix_cli::projection::{TableProjection, VALUE_HEADER};
use serde_json::json;

#[test]
fn test_result_envelope_list_of_objects() {
    let response = json!({"result": [{"id": 1, "name": "BTC"}, {"id": 2, "name": "ETH"}]});
    let projection = TableProjection::from_value(&response);

    assert_eq!(projection.row_count(), 2);
    assert_eq!(projection.column_count(), 2);
    assert_eq!(projection.headers(), &["id".to_string(), "name".to_string()]);
    assert_eq!(projection.cell(0, 1), Some("BTC"));
    assert_eq!(projection.cell(1, 1), Some("ETH"));
    assert_eq!(projection.cell(0, 0), Some("1"));
}

#[test]
fn test_columns_keep_insertion_order() {
    let response: serde_json::Value =
        serde_json::from_str(r#"[{"symbol": "BTC/USDT", "ask": 2, "bid": 1}]"#).unwrap();
    let projection = TableProjection::from_value(&response);

    assert_eq!(projection.headers(), &["symbol", "ask", "bid"]);
}

#[test]
fn test_plain_object_is_pretty_printed() {
    let response = json!({"status": "ok"});
    let projection = TableProjection::from_value(&response);

    assert!(projection.is_single_cell());
    assert_eq!(projection.headers(), &[VALUE_HEADER]);
    assert_eq!(
        projection.cell(0, 0),
        Some(serde_json::to_string_pretty(&response).unwrap().as_str())
    );
    assert_eq!(projection.cell(0, 0), Some("{\n  \"status\": \"ok\"\n}"));
}

#[test]
fn test_non_object_lists_and_empty_lists_are_single_cells() {
    let projection = TableProjection::from_value(&json!({"result": []}));
    assert!(projection.is_single_cell());
    assert_eq!(projection.cell(0, 0), Some("[]"));

    let projection = TableProjection::from_value(&json!(["BTC", "ETH"]));
    assert!(projection.is_single_cell());
    assert_eq!(projection.cell(0, 0), Some("[\n  \"BTC\",\n  \"ETH\"\n]"));
}

#[test]
fn test_unwrapped_scalar_result_is_json_text() {
    let projection = TableProjection::from_value(&json!({"result": "maintenance"}));
    assert_eq!(projection.cell(0, 0), Some("\"maintenance\""));
}

#[test]
fn test_error_renders_verbatim() {
    let projection = TableProjection::from_outcome(&Err(FetchError::Timeout));
    assert!(projection.is_single_cell());
    assert_eq!(projection.cell(0, 0), Some("connection timeout"));
}

// A successful string payload cannot be told apart from an error in the table:
// both render as the same single verbatim cell. Only the fetch outcome's tag
// (shown in the status bar) still distinguishes them.
#[test]
fn test_string_payload_renders_like_an_error() {
    let success = TableProjection::from_outcome(&Ok(json!("connection timeout")));
    let failure = TableProjection::from_outcome(&Err(FetchError::Timeout));

    assert_eq!(success, failure);
    assert_eq!(
        TableProjection::from_value(&json!("connection timeout")),
        failure
    );
}

// Rows are filled from each element's own values in order; elements with a
// different shape than the first are not realigned by key.
#[test]
fn test_heterogeneous_rows_are_positional() {
    let response = json!([
        {"id": 1, "name": "BTC"},
        {"name": "ETH", "id": 2, "extra": true},
        {"id": 3},
        "loose"
    ]);
    let projection = TableProjection::from_value(&response);

    assert_eq!(projection.headers(), &["id", "name"]);
    assert_eq!(projection.row_count(), 4);
    assert_eq!(projection.rows()[1], vec!["ETH", "2"]);
    assert_eq!(projection.rows()[2], vec!["3", ""]);
    assert_eq!(projection.rows()[3], vec!["loose", ""]);
}

#[test]
fn test_nested_values_are_compact_json() {
    let response = json!([{"code": "BTC", "networks": ["BTC", "LN"], "limits": {"min": 0.001}, "note": null}]);
    let projection = TableProjection::from_value(&response);

    assert_eq!(projection.cell(0, 1), Some(r#"["BTC","LN"]"#));
    assert_eq!(projection.cell(0, 2), Some(r#"{"min":0.001}"#));
    assert_eq!(projection.cell(0, 3), Some("NULL"));
}

#[test]
fn test_single_object_list_keeps_its_column() {
    let projection = TableProjection::from_value(&json!({"result": [{"code": "BTC"}]}));

    assert!(!projection.is_single_cell());
    assert_eq!(projection.headers(), &["code"]);
    assert_eq!(projection.cell(0, 0), Some("BTC"));
    assert_ne!(projection.headers(), &[VALUE_HEADER]);
}
