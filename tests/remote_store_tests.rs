use httpmock::prelude::*;
use rlunchpoll::core::workflow::SyncOutcome;
use rlunchpoll::models::answer::Answer;
use rlunchpoll::models::interval::Interval;
use rlunchpoll::store::remote::RestStore;
use rlunchpoll::store::{ResponseStore, SharedStore, StoreError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{PIN, WAIT, response, today, workflow};

fn store_for(server: &MockServer, timeout_secs: u64) -> RestStore {
    RestStore::new(&server.base_url(), "test-key", "responses", timeout_secs).unwrap()
}

#[tokio::test]
async fn test_query_filters_by_day_and_sends_key() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/rest/v1/responses")
                .query_param("select", "*")
                .query_param("day", "eq.2025-10-17")
                .header("apikey", "test-key")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!([
                {
                    "id": 7,
                    "day": "2025-10-17",
                    "name": "Ana",
                    "answer": "yes",
                    "intervals": [{"start": "11:30", "end": "12:30"}],
                    "inserted_at": "2025-10-17T09:30:00+00:00"
                },
                {
                    "id": 8,
                    "day": "2025-10-17",
                    "name": "Bor",
                    "answer": null,
                    "intervals": [],
                    "inserted_at": "2025-10-17T09:31:00+00:00"
                }
            ]));
        })
        .await;

    let rows = store_for(&server, 2).query(today()).await.unwrap();

    m.assert_async().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Ana");
    assert_eq!(rows[0].answer, Some(Answer::Yes));
    assert_eq!(rows[0].intervals, vec![Interval::new("11:30", "12:30")]);
    assert_eq!(rows[1].answer, None);
}

#[tokio::test]
async fn test_upsert_posts_with_conflict_target() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path("/rest/v1/responses")
                .query_param("on_conflict", "day,name")
                .header("prefer", "resolution=merge-duplicates,return=minimal")
                .header("apikey", "test-key")
                .json_body(json!([{
                    "day": "2025-10-17",
                    "name": "Ana",
                    "answer": "yes",
                    "intervals": [{"start": "11:30", "end": "12:30"}],
                    "inserted_at": "2025-10-17T09:30:00Z"
                }]));
            then.status(201);
        })
        .await;

    store_for(&server, 2)
        .upsert(&response(
            "Ana",
            Some(Answer::Yes),
            vec![Interval::new("11:30", "12:30")],
        ))
        .await
        .unwrap();

    m.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/rest/v1/responses");
            then.status(500).body("boom");
        })
        .await;

    let err = store_for(&server, 2)
        .upsert(&response("Ana", Some(Answer::No), vec![]))
        .await
        .unwrap_err();

    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/rest/v1/responses");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!([]));
        })
        .await;

    let err = store_for(&server, 1).query(today()).await.unwrap_err();
    assert!(matches!(err, StoreError::Timeout(1)));
}

#[tokio::test]
async fn test_workflow_survives_unreachable_store() {
    // nothing listens on the discard port
    let store = RestStore::new("http://127.0.0.1:9", "test-key", "responses", 1).unwrap();
    let mut wf = workflow(Some(Arc::new(store) as SharedStore));

    assert!(wf.load().await.is_empty());

    wf.set_name("Ana");
    wf.set_pin(PIN);
    wf.choose_answer(Some(Answer::Yes));
    let receipt = wf.submit().unwrap();

    assert!(matches!(receipt.settle(WAIT).await, SyncOutcome::Failed(_)));
    assert_eq!(wf.board().yes_names(), vec!["Ana"]);
    assert!(wf.error().is_empty());
}

async fn mock_uneven_rows(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/rest/v1/responses");
            then.status(200).json_body(json!([
                {
                    "day": "2025-10-17",
                    "name": "Ana",
                    "answer": "yes",
                    "intervals": [{"start": "11:30", "end": "12:30"}],
                    "inserted_at": "2025-10-17T09:30:00Z"
                },
                {
                    "day": "2025-10-17",
                    "name": "Bor",
                    "answer": "no",
                    "intervals": null,
                    "inserted_at": "2025-10-17T09:31:00Z"
                },
                {
                    "day": "2025-10-17",
                    "name": "Cene",
                    "answer": "maybe",
                    "inserted_at": "2025-10-17T09:32:00Z"
                },
                {
                    "day": "2025-10-17",
                    "name": "Dora",
                    "answer": "yes",
                    "intervals": []
                }
            ]));
        })
        .await;
}

#[tokio::test]
async fn test_uneven_rows_do_not_hide_the_rest() {
    let server = MockServer::start_async().await;
    mock_uneven_rows(&server).await;

    let rows = store_for(&server, 2).query(today()).await.unwrap();

    // Dora has no inserted_at and is skipped; the others survive
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bor", "Cene"]);
    assert!(rows[1].intervals.is_empty());
    assert_eq!(rows[1].answer, Some(Answer::No));
    assert_eq!(rows[2].answer, None);
}

#[tokio::test]
async fn test_board_keeps_good_rows_next_to_bad_ones() {
    let server = MockServer::start_async().await;
    mock_uneven_rows(&server).await;

    let store = store_for(&server, 2);
    let mut wf = workflow(Some(Arc::new(store) as SharedStore));

    assert_eq!(wf.load().await.len(), 3);

    let board = wf.board();
    assert_eq!(board.yes_names(), vec!["Ana"]);
    assert_eq!(board.no_names(), vec!["Bor"]);
    assert_eq!(board.yes[0].intervals, vec![Interval::new("11:30", "12:30")]);
}
