//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use docreview::api::Document;
use docreview::output::{
    DocumentListResult, NavigationResult, OperationResult, OutputMode, PayloadResult, StatusResult,
};
use docreview::router::{Router, Step};
use docreview::storage::MemoryKeyValueStore;
use docreview::store::WorkflowStore;
use serde_json::json;

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn status_result_serialization() {
    let result = StatusResult {
        document_id: Some("d1".to_string()),
        document_name: Some("srs.docx".to_string()),
        parse_id: None,
        review_id: None,
        theme: "light".to_string(),
        language: "zh-CN".to_string(),
        next_step: Step::Parse,
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["document_id"], "d1");
    assert_eq!(json["parse_id"], serde_json::Value::Null);
    assert_eq!(json["next_step"], "parse");
}

#[test]
fn navigation_result_from_redirect() {
    let mut store = WorkflowStore::load(MemoryKeyValueStore::new());
    store.set_document("d1", "srs.docx").unwrap();
    let nav = Router::default().navigate(Step::Report, &mut store);

    let result = NavigationResult::from_navigation(Step::Report, &nav);
    assert!(result.redirected);
    assert_eq!(result.requested, Step::Report);
    assert_eq!(result.step, Step::Parse);
    assert_eq!(result.missing.as_deref(), Some("parseId"));
    assert_eq!(result.path.as_deref(), Some("/documents/d1/parse"));
    assert_eq!(result.title, "Requirement Analysis - Document Review System");
}

#[test]
fn navigation_result_allowed() {
    let mut store = WorkflowStore::load(MemoryKeyValueStore::new());
    let nav = Router::default().navigate(Step::Upload, &mut store);

    let json = serde_json::to_value(NavigationResult::from_navigation(Step::Upload, &nav)).unwrap();
    assert_eq!(json["redirected"], false);
    assert_eq!(json["missing"], serde_json::Value::Null);
    assert_eq!(json["path"], "/");
}

#[test]
fn payload_result_passes_payload_through() {
    let payload = json!({"tree": [{"id": "R1", "children": []}]});
    let result = PayloadResult {
        label: "Parse result".to_string(),
        id: Some("p1".to_string()),
        payload: payload.clone(),
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["payload"], payload);
}

#[test]
fn document_list_serialization() {
    let result = DocumentListResult {
        documents: vec![Document {
            id: "d1".to_string(),
            name: "srs.docx".to_string(),
            extra: json!({"size": 2048}).as_object().cloned().unwrap_or_default(),
        }],
        current: Some("d1".to_string()),
    };

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"current\":\"d1\""));
    assert!(json.contains("srs.docx"));
    assert!(json.contains("\"size\":2048"));
}

#[test]
fn operation_result_ok() {
    let result = OperationResult::ok("done");
    assert!(result.success);
    assert_eq!(serde_json::to_value(&result).unwrap(), json!({"success": true, "message": "done"}));
}
