#![cfg(feature = "sqlite")]

use std::sync::Arc;
use std::time::Duration;

use sql_rowpool::prelude::*;
use tokio::sync::Barrier;

fn shared_memory(name: &str) -> String {
    format!("file:{name}?mode=memory&cache=shared")
}

#[tokio::test]
async fn pool_reports_size_and_availability() -> Result<(), RowPoolError> {
    let db = shared_memory("slots_size");
    let pool = RowPool::new_sqlite([db.as_str(), db.as_str(), db.as_str()]).await?;
    assert_eq!(pool.size(), 3);
    assert_eq!(pool.available(), 3);

    let held = pool.acquire().await?;
    assert_eq!(pool.available(), 2);
    drop(held);
    assert_eq!(pool.available(), 3);
    Ok(())
}

#[tokio::test]
async fn acquire_waits_for_a_returned_connection() -> Result<(), RowPoolError> {
    let db = shared_memory("slots_wait");
    let pool = RowPool::new_sqlite([db.as_str()]).await?;

    let held = pool.acquire().await?;
    let blocked = tokio::time::timeout(Duration::from_millis(50), pool.acquire()).await;
    assert!(blocked.is_err(), "second acquire must wait on a one-slot pool");

    let waiter = {
        let pool = pool.clone();
        tokio::spawn(async move { pool.select_int("SELECT 41 + 1", &[]).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    drop(held);
    let answer = waiter
        .await
        .map_err(|e| RowPoolError::Pool(e.to_string()))??;
    assert_eq!(answer, Some(42));
    assert_eq!(pool.available(), 1);
    Ok(())
}

#[tokio::test]
async fn construction_fails_on_the_first_bad_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.db");
    let missing = dir.path().join("no_such_dir").join("bad.db");

    let err = RowPool::new_sqlite([
        good.to_string_lossy().into_owned(),
        missing.to_string_lossy().into_owned(),
        good.to_string_lossy().into_owned(),
    ])
    .await
    .unwrap_err();

    assert!(
        matches!(err, RowPoolError::Open { index: 1, .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn empty_descriptor_list_is_rejected() {
    let err = RowPool::new_sqlite(Vec::<String>::new()).await.unwrap_err();
    assert!(matches!(err, RowPoolError::Config(_)));
}

#[tokio::test]
async fn failing_operations_return_their_connection() -> Result<(), RowPoolError> {
    let db = shared_memory("slots_failures");
    let pool = RowPool::new_sqlite([db.as_str(), db.as_str()]).await?;

    for _ in 0..10 {
        assert!(pool.query("SELECT * FROM missing_table", &[]).await.is_err());
        assert!(pool.exec("NOT SQL AT ALL", &[]).await.is_err());
        assert!(pool.select_int("SELECT 'abc'", &[]).await.is_err());
    }
    assert_eq!(pool.available(), pool.size());

    // the pool still works afterwards
    assert_eq!(pool.select_int("SELECT 7", &[]).await?, Some(7));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tasks_never_exceed_pool_size() -> Result<(), RowPoolError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.db").to_string_lossy().into_owned();
    let pool = RowPool::new_sqlite(vec![path; 3]).await?;
    pool.exec(
        "CREATE TABLE hits (id INTEGER PRIMARY KEY AUTOINCREMENT, task INTEGER NOT NULL)",
        &[],
    )
    .await?;

    let tasks = 12;
    let barrier = Arc::new(Barrier::new(tasks));
    let mut handles = Vec::new();
    for task in 0..tasks {
        let pool = pool.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            for _ in 0..5 {
                assert!(pool.available() <= pool.size());
                pool.insert("INSERT INTO hits (task) VALUES (?1)", &[task.into()])
                    .await?;
            }
            Ok::<_, RowPoolError>(())
        }));
    }
    for handle in handles {
        handle
            .await
            .map_err(|e| RowPoolError::Pool(e.to_string()))??;
    }

    assert_eq!(pool.available(), 3);
    assert_eq!(pool.select_int("SELECT COUNT(*) FROM hits", &[]).await?, Some(60));
    Ok(())
}

#[tokio::test]
async fn builder_applies_options() -> Result<(), RowPoolError> {
    let db = shared_memory("slots_builder");
    let pool = SqliteOptions::builder(vec![db.clone(), db])
        .wal(false)
        .busy_timeout(Duration::from_millis(100))
        .build()
        .await?;
    assert_eq!(pool.size(), 2);
    Ok(())
}
