//! Recall and progress API tests.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::fixtures::{self, PHILIPPIANS_ID, PHILIPPIANS_TEXT};
use common::TestContext;

/// Test recall reports raw accuracy, with no pass gate.
#[tokio::test]
async fn test_recall_scores() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/recall")
        .json(&fixtures::recall_request(PHILIPPIANS_ID, PHILIPPIANS_TEXT))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "verse_id": PHILIPPIANS_ID, "score": 100 }));

    let response = server
        .post("/api/recall")
        .json(&fixtures::recall_request(PHILIPPIANS_ID, "tout"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["score"], 11);
}

/// Test empty recall is rejected and not recorded.
#[tokio::test]
async fn test_recall_empty_input() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/recall")
        .json(&fixtures::recall_request(PHILIPPIANS_ID, ""))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "incomplete_answer");
}

/// Test recall for an unknown verse.
#[tokio::test]
async fn test_recall_unknown_verse() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/recall")
        .json(&fixtures::recall_request("jn-99-1", "anything"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test an untracked verse reports an empty record.
#[tokio::test]
async fn test_progress_untracked_verse() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/progress/ps-23-1").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["verse_id"], "ps-23-1");
    assert_eq!(body["attempts"], 0);
    assert_eq!(body["rolling_accuracy"], 0);
    assert_eq!(body["mastered"], false);
    assert!(body.get("last_reviewed").is_none());
}

/// Test progress for an unknown verse.
#[tokio::test]
async fn test_progress_unknown_verse() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/progress/jn-99-1").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test three accurate recalls master a verse and show in the summary.
#[tokio::test]
async fn test_mastery_after_three_recalls() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..3 {
        server
            .post("/api/recall")
            .json(&fixtures::recall_request(PHILIPPIANS_ID, PHILIPPIANS_TEXT))
            .await
            .assert_status_ok();
    }
    ctx.wait_for_progress(PHILIPPIANS_ID, |r| r.attempts == 3)
        .await;

    let response = server
        .get(&format!("/api/progress/{}", PHILIPPIANS_ID))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["attempts"], 3);
    assert_eq!(body["rolling_accuracy"], 100);
    assert_eq!(body["mastered"], true);
    assert!(body["last_reviewed"].is_string());

    let response = server.get("/api/progress").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
    // 100 over 14 catalog verses
    assert_eq!(
        body["summary"],
        json!({ "total": 14, "mastered": 1, "average_accuracy": 7 })
    );
}

/// Test a poor recall drops mastery again.
#[tokio::test]
async fn test_mastery_can_be_lost() {
    let ctx = TestContext::new();
    let server = ctx.server();

    for _ in 0..3 {
        server
            .post("/api/recall")
            .json(&fixtures::recall_request(PHILIPPIANS_ID, PHILIPPIANS_TEXT))
            .await
            .assert_status_ok();
    }
    server
        .post("/api/recall")
        .json(&fixtures::recall_request(PHILIPPIANS_ID, "tout"))
        .await
        .assert_status_ok();

    let record = ctx
        .wait_for_progress(PHILIPPIANS_ID, |r| r.attempts == 4)
        .await;
    // (100 * 3 + 11) / 4 = 77.75
    assert_eq!(record.rolling_accuracy, 78);
    assert!(!record.mastered);
}
