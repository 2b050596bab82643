use rlunchpoll::models::answer::Answer;
use rlunchpoll::models::interval::Interval;
use rlunchpoll::store::ResponseStore;
use rlunchpoll::store::sqlite::SqliteStore;
use std::sync::Arc;
use tempfile::tempdir;

mod common;
use common::{response, today, yesterday};

#[tokio::test]
async fn test_upsert_replaces_same_day_and_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("poll.sqlite");
    let store = SqliteStore::open(&path.to_string_lossy()).unwrap();

    store
        .upsert(&response(
            "Ana",
            Some(Answer::Yes),
            vec![Interval::new("11:30", "12:30")],
        ))
        .await
        .unwrap();
    store
        .upsert(&response("Bor", Some(Answer::No), vec![]))
        .await
        .unwrap();
    store
        .upsert(&response("Ana", Some(Answer::No), vec![]))
        .await
        .unwrap();

    let rows = store.query(today()).await.unwrap();
    assert_eq!(rows.len(), 2);

    let ana = rows.iter().find(|r| r.name == "Ana").unwrap();
    assert_eq!(ana.answer, Some(Answer::No));
    assert!(ana.intervals.is_empty());
}

#[tokio::test]
async fn test_query_is_scoped_to_the_day() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("poll.sqlite");
    let store = SqliteStore::open(&path.to_string_lossy()).unwrap();

    let mut old = response("Ana", Some(Answer::Yes), vec![]);
    old.day = yesterday();
    store.upsert(&old).await.unwrap();
    store
        .upsert(&response("Ana", Some(Answer::No), vec![]))
        .await
        .unwrap();

    let today_rows = store.query(today()).await.unwrap();
    let old_rows = store.query(yesterday()).await.unwrap();

    assert_eq!(today_rows.len(), 1);
    assert_eq!(today_rows[0].answer, Some(Answer::No));
    assert_eq!(old_rows.len(), 1);
    assert_eq!(old_rows[0].answer, Some(Answer::Yes));
}

#[tokio::test]
async fn test_record_survives_reopen_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("poll.sqlite");
    let original = response(
        "Žan",
        Some(Answer::Yes),
        vec![
            Interval::new("11:00", "11:30"),
            Interval::new("13:00", "14:00"),
        ],
    );

    {
        let store = SqliteStore::open(&path.to_string_lossy()).unwrap();
        store.upsert(&original).await.unwrap();
    }

    let store = SqliteStore::open(&path.to_string_lossy()).unwrap();
    let rows = store.query(today()).await.unwrap();
    assert_eq!(rows, vec![original]);
}

#[tokio::test]
async fn test_unset_answer_is_stored_as_null() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("poll.sqlite");
    let store = SqliteStore::open(&path.to_string_lossy()).unwrap();

    store.upsert(&response("Dora", None, vec![])).await.unwrap();

    let rows = store.query(today()).await.unwrap();
    assert_eq!(rows[0].answer, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_upserts_from_spawned_tasks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("poll.sqlite");
    let store = Arc::new(SqliteStore::open(&path.to_string_lossy()).unwrap());

    let mut tasks = Vec::new();
    for name in ["Ana", "Bor", "Cene", "Dora", "Eva", "Ana"] {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store.upsert(&response(name, Some(Answer::Yes), vec![])).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let rows = store.query(today()).await.unwrap();
    assert_eq!(rows.len(), 5);
}
