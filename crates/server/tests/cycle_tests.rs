//! End-to-end cycle tests through the on-demand trigger endpoint.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};
use scholar_watcher_core::WatchStore;

#[tokio::test]
async fn test_run_cycle_delivers_new_items() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/keywords", json!({"term": "graphs"}))
        .await;
    fixture.provider.set_results(
        "graphs",
        vec![fixtures::candidate("P1"), fixtures::candidate("P2")],
    );

    let response = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["new_items"], 2);
    assert_eq!(response.body["keywords_scanned"], 1);
    assert!(response.body.get("keyword_failures").is_none());

    let deliveries = fixture.notifier.deliveries();
    assert_eq!(deliveries.len(), 2);
    assert_eq!(deliveries[0].keyword, "graphs");
    assert_eq!(deliveries[0].result.title, "P1");
}

#[tokio::test]
async fn test_second_cycle_is_deduplicated() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/keywords", json!({"term": "graphs"}))
        .await;
    fixture
        .provider
        .set_results("graphs", vec![fixtures::candidate("P1")]);

    let first = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(first.body["new_items"], 1);

    let second = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(second.body["new_items"], 0);
    assert_eq!(fixture.notifier.deliveries().len(), 1);
}

#[tokio::test]
async fn test_provider_failure_isolated_per_keyword() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/keywords", json!({"term": "broken"}))
        .await;
    fixture
        .post("/api/v1/keywords", json!({"term": "working"}))
        .await;
    fixture.provider.fail_keyword("broken");
    fixture
        .provider
        .set_results("working", vec![fixtures::candidate("P1")]);

    let response = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["new_items"], 1);
    assert_eq!(response.body["keywords_scanned"], 2);

    let failures = response.body["keyword_failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["term"], "broken");
    assert_eq!(failures[0]["kind"], "provider");
}

#[tokio::test]
async fn test_notify_failure_rolls_back_and_retries() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/keywords", json!({"term": "graphs"}))
        .await;
    fixture
        .provider
        .set_results("graphs", vec![fixtures::candidate("P1")]);
    fixture.notifier.fail_next();

    let first = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(first.body["new_items"], 0);
    let failures = first.body["keyword_failures"].as_array().unwrap();
    assert_eq!(failures[0]["kind"], "notify");

    // The claim was released, so the store holds no trace of the item.
    assert_eq!(fixture.store.stats().unwrap().seen_results, 0);

    // Next cycle retries and succeeds.
    let second = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(second.body["new_items"], 1);
    assert_eq!(fixture.notifier.deliveries().len(), 1);
}

#[tokio::test]
async fn test_removing_keyword_resets_dedup_history() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/keywords", json!({"term": "graphs"}))
        .await;
    fixture
        .provider
        .set_results("graphs", vec![fixtures::candidate("P1")]);

    fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(fixture.notifier.deliveries().len(), 1);

    fixture.delete("/api/v1/keywords/graphs").await;
    fixture
        .post("/api/v1/keywords", json!({"term": "graphs"}))
        .await;

    // Same item is new again for the re-added keyword.
    let response = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(response.body["new_items"], 1);
    assert_eq!(fixture.notifier.deliveries().len(), 2);
}

#[tokio::test]
async fn test_status_reflects_last_run() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/keywords", json!({"term": "graphs"}))
        .await;
    fixture
        .provider
        .set_results("graphs", vec![fixtures::candidate("P1")]);

    fixture.post_empty("/api/v1/cycles/run").await;

    let response = fixture.get("/api/v1/status").await;
    assert_eq!(response.body["seen_results"], 1);
    let last_run = &response.body["scheduler"]["last_run"];
    assert_eq!(last_run["new_items"], 1);
    assert_eq!(last_run["keywords_scanned"], 1);
    assert!(last_run["error"].is_null());
}

#[tokio::test]
async fn test_cycle_with_no_keywords() {
    let fixture = TestFixture::new();

    let response = fixture.post_empty("/api/v1/cycles/run").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["new_items"], 0);
    assert_eq!(response.body["keywords_scanned"], 0);
}
