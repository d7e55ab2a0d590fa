//! Schema Tests
//!
//! - Opening creates exactly the three tables
//! - Reopening an existing ledger keeps its rows
//! - drop_tables starts from empty tables
//! - Externally supplied stores are initialized too

use crate::*;
use std::sync::Arc;

const TABLES: [&str; 3] = ["attachments", "test_runs", "tests"];

/// Test a fresh recorder has exactly the expected tables
#[tokio::test]
async fn test_open_creates_three_tables() {
    let recorder = ephemeral().await;
    assert_eq!(sqlite(&recorder).table_names().await.unwrap(), TABLES);
}

/// Test create twice is harmless
#[tokio::test]
async fn test_create_schema_twice() {
    let recorder = ephemeral().await;
    let store = sqlite(&recorder);
    recorder.on_begin().await.unwrap();

    store.create_schema().await.unwrap();
    store.create_schema().await.unwrap();

    assert_eq!(store.table_names().await.unwrap(), TABLES);
    assert_eq!(store.run_count().await.unwrap(), 1);
}

/// Test reopening without drop keeps earlier runs
#[tokio::test]
async fn test_reopen_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    {
        let recorder = Recorder::open(&path).await.unwrap();
        recorder.on_begin().await.unwrap();
        recorder
            .on_end(&FullResult::new(RunOutcome::Passed))
            .await
            .unwrap();
    }

    let recorder = Recorder::open(&path).await.unwrap();
    assert_eq!(sqlite(&recorder).run_count().await.unwrap(), 1);
}

/// Test drop_tables empties the ledger before the new run
#[tokio::test]
async fn test_drop_tables_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    {
        let recorder = Recorder::open(&path).await.unwrap();
        recorder.on_begin().await.unwrap();
        recorder
            .on_test_begin(&TestCase::new("h1", "A"))
            .await
            .unwrap();
    }

    let recorder = Recorder::builder()
        .path(&path)
        .drop_tables(true)
        .open()
        .await
        .unwrap();
    let store = sqlite(&recorder);
    assert_eq!(store.table_names().await.unwrap(), TABLES);
    assert_eq!(store.run_count().await.unwrap(), 0);

    recorder.on_begin().await.unwrap();
    assert_eq!(store.run_count().await.unwrap(), 1);
}

/// Test builder settings follow a config value
#[tokio::test]
async fn test_builder_from_config() {
    let config = RecorderConfig::from_toml("database = \":memory:\"\ndrop_tables = true").unwrap();
    let builder = Recorder::builder().config(config);
    assert!(builder.settings().is_in_memory());
    assert!(builder.settings().drop_tables);

    let recorder = builder.open().await.unwrap();
    assert!(recorder.synchronizer().options().drop_schema);
}

/// Test an injected store is prepared and driven
#[tokio::test]
async fn test_with_external_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    let recorder = Recorder::with_store(Arc::new(store.clone()), false)
        .await
        .unwrap();
    assert!(recorder.sqlite_store().is_none());
    assert_eq!(store.table_names().await.unwrap(), TABLES);

    let test = TestCase::new("h1", "A");
    recorder.on_test_begin(&test).await.unwrap();
    recorder
        .on_test_end(&test, &result(TestStatus::Skipped, 0, 0))
        .await
        .unwrap();

    let run_id = recorder.synchronizer().run_id().unwrap();
    let rows = store.tests_for_run(run_id).await.unwrap();
    assert_eq!(rows[0].status, Some(TestStatus::Skipped));
}
