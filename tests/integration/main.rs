//! Integration tests for docreview CLI
//!
//! These tests drive the binary against a fake backend through the full
//! cycle of: upload → parse → review → report

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;


use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use common::mock_backend::{MockBackend, MockRoute};

/// Helper function to create a docreview command wired to `backend`
fn docreview(home: &Path, backend: &MockBackend) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("docreview"));
    cmd.env("DOCREVIEW_HOME", home)
        .env("DOCREVIEW_API_URL", backend.base_url())
        .env("DOCREVIEW_TIMEOUT", "5")
        .env_remove("DOCREVIEW_REVISION")
        .env_remove("DOCREVIEW_GUARD")
        .env_remove("DOCREVIEW_DEV_MODE")
        .env("RUST_LOG", "info")
        .current_dir(home);
    cmd
}

/// Persisted key/value state
fn stored(home: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(home.join("storage.json")).unwrap()).unwrap()
}

fn current_backend() -> MockBackend {
    MockBackend::start(vec![
        MockRoute::json("POST", "/upload", json!({"id": "doc-1", "filename": "srs.docx"})),
        MockRoute::json("GET", "/documents", json!({"documents": [{"id": "doc-1", "name": "srs.docx", "size": 2048, "status": "parsed"}]})),
        MockRoute::json("POST", "/parse", json!({"parse_id": "parse-1", "tree": [{"id": "R1"}]})),
        MockRoute::json("GET", "/parse/parse-1", json!({"tree": [{"id": "R1"}]})),
        MockRoute::json("POST", "/validate", json!({"review_id": "review-1", "issues": []})),
        MockRoute::json("GET", "/validate/review-1", json!({"issues": []})),
        MockRoute::bytes("GET", "/review/review-1/export", "application/pdf", b"%PDF-1.7 report"),
    ])
}

#[test]
fn test_full_workflow() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = current_backend();
    fs::write(home.join("srs.docx"), b"The system shall log in users.").unwrap();

    docreview(home, &backend)
        .args(["upload", "srs.docx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("document doc-1"));
    assert_eq!(stored(home)["documentId"], "doc-1");
    assert_eq!(stored(home)["documentName"], "srs.docx");

    docreview(home, &backend)
        .arg("parse")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse-1"));
    assert_eq!(backend.last_request().json(), json!({"document_id": "doc-1"}));
    assert_eq!(stored(home)["parseId"], "parse-1");

    docreview(home, &backend)
        .args(["review", "--option", "strict=true", "--option", "profile=iso29148"])
        .assert()
        .success()
        .stdout(predicate::str::contains("review-1"));
    assert_eq!(
        backend.last_request().json(),
        json!({"doc_id": "parse-1", "strict": true, "profile": "iso29148"})
    );
    assert_eq!(stored(home)["reviewId"], "review-1");

    docreview(home, &backend)
        .args(["report", "--format", "pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("report-review-1.pdf"));
    assert_eq!(fs::read(home.join("report-review-1.pdf")).unwrap(), b"%PDF-1.7 report");
    assert_eq!(backend.last_request().query.as_deref(), Some("format=pdf"));

    docreview(home, &backend)
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"next_step\": \"report\""));
}

#[test]
fn test_reupload_drops_parse_and_review() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = current_backend();
    fs::write(home.join("srs.docx"), b"v2").unwrap();
    fs::write(
        home.join("storage.json"),
        r#"{"documentId": "old", "parseId": "p-old", "reviewId": "r-old", "theme": "dark"}"#,
    )
    .unwrap();

    docreview(home, &backend).args(["upload", "srs.docx"]).assert().success();

    let state = stored(home);
    assert_eq!(state["documentId"], "doc-1");
    assert!(state.get("parseId").is_none());
    assert!(state.get("reviewId").is_none());
    assert_eq!(state["theme"], "dark");
}

#[test]
fn test_reparse_drops_review() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = current_backend();
    fs::write(
        home.join("storage.json"),
        r#"{"documentId": "doc-1", "parseId": "p-old", "reviewId": "r-old"}"#,
    )
    .unwrap();

    docreview(home, &backend).arg("parse").assert().success();

    let state = stored(home);
    assert_eq!(state["parseId"], "parse-1");
    assert!(state.get("reviewId").is_none());
}

#[test]
fn test_result_commands_use_stored_ids() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = current_backend();
    fs::write(
        home.join("storage.json"),
        r#"{"documentId": "doc-1", "parseId": "parse-1", "reviewId": "review-1"}"#,
    )
    .unwrap();

    docreview(home, &backend)
        .arg("parse-result")
        .assert()
        .success()
        .stdout(predicate::str::contains("R1"));
    assert_eq!(backend.last_request().path, "/api/parse/parse-1");

    docreview(home, &backend).arg("review-result").assert().success();
    assert_eq!(backend.last_request().path, "/api/validate/review-1");
}

#[test]
fn test_documents_marks_current() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = current_backend();
    fs::write(home.join("storage.json"), r#"{"documentId": "doc-1"}"#).unwrap();

    docreview(home, &backend)
        .args(["--json", "documents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current\": \"doc-1\""))
        .stdout(predicate::str::contains("srs.docx"))
        .stdout(predicate::str::contains("\"size\": 2048"))
        .stdout(predicate::str::contains("\"status\": \"parsed\""));
}

#[test]
fn test_backend_error_leaves_state_untouched() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = MockBackend::start(vec![
        MockRoute::json("POST", "/parse", json!({"message": "parser crashed"})).with_status(500),
    ]);
    fs::write(home.join("storage.json"), r#"{"documentId": "doc-1", "parseId": "p-old"}"#).unwrap();

    docreview(home, &backend)
        .arg("parse")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API Error:"))
        .stderr(predicate::str::contains("backend reported an internal error"))
        .stderr(predicate::str::contains("parser crashed"));

    assert_eq!(stored(home)["parseId"], "p-old");
}

#[test]
fn test_unauthorized_is_logged() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = MockBackend::start(vec![
        MockRoute::json("GET", "/documents", json!({"message": "token expired"})).with_status(401),
    ]);

    docreview(home, &backend)
        .arg("documents")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API Error:"))
        .stderr(predicate::str::contains("unauthorized"))
        .stderr(predicate::str::contains("internal error").not());
}

#[test]
fn test_report_name_from_unsafe_review_id() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = MockBackend::start(vec![MockRoute::bytes(
        "GET",
        "/review/..%2Fr%2F1/export",
        "application/pdf",
        b"%PDF",
    )]);
    fs::write(
        home.join("storage.json"),
        r#"{"documentId": "doc-1", "parseId": "parse-1", "reviewId": "../r/1"}"#,
    )
    .unwrap();

    docreview(home, &backend)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("report-.._r_1.pdf"));

    assert_eq!(fs::read(home.join("report-.._r_1.pdf")).unwrap(), b"%PDF");
}

#[test]
fn test_review_without_review_id_fails() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let backend = MockBackend::start(vec![MockRoute::json("POST", "/validate", json!({"issues": []}))]);
    fs::write(home.join("storage.json"), r#"{"documentId": "doc-1", "parseId": "parse-1"}"#).unwrap();

    docreview(home, &backend)
        .arg("review")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no review id"));

    assert!(stored(home).get("reviewId").is_none());
}
