//! Store doubles shared by the engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use runledger_core::{FullResult, LedgerResult, RunId, RunStore, TestCase, TestResult};
use runledger_storage::SqliteStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Create an in-memory store with the schema in place
pub async fn store_with_schema() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create_schema().await.unwrap();
    store
}

/// Delegates to SQLite, counting `open_run` calls and delaying them so that
/// concurrent first events overlap.
pub struct SlowOpenStore {
    pub inner: SqliteStore,
    pub opens: AtomicUsize,
    pub delay: Duration,
}

impl SlowOpenStore {
    pub fn new(inner: SqliteStore, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner,
            opens: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn open_calls(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunStore for SlowOpenStore {
    async fn drop_schema(&self) -> LedgerResult<()> {
        self.inner.drop_schema().await
    }

    async fn create_schema(&self) -> LedgerResult<()> {
        self.inner.create_schema().await
    }

    async fn open_run(&self) -> LedgerResult<RunId> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.inner.open_run().await
    }

    async fn register_test(&self, run: RunId, test: &TestCase) -> LedgerResult<()> {
        self.inner.register_test(run, test).await
    }

    async fn record_test_result(
        &self,
        run: RunId,
        test: &TestCase,
        result: &TestResult,
    ) -> LedgerResult<u64> {
        self.inner.record_test_result(run, test, result).await
    }

    async fn close_run(&self, run: RunId, result: &FullResult) -> LedgerResult<()> {
        self.inner.close_run(run, result).await
    }
}

/// A store whose `open_run` reports rowid 0, and which counts every mutation
#[derive(Default)]
pub struct ZeroIdStore {
    pub opens: AtomicUsize,
    pub mutations: AtomicUsize,
}

#[async_trait]
impl RunStore for ZeroIdStore {
    async fn drop_schema(&self) -> LedgerResult<()> {
        Ok(())
    }

    async fn create_schema(&self) -> LedgerResult<()> {
        Ok(())
    }

    async fn open_run(&self) -> LedgerResult<RunId> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(RunId::new(0))
    }

    async fn register_test(&self, _run: RunId, _test: &TestCase) -> LedgerResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn record_test_result(
        &self,
        _run: RunId,
        _test: &TestCase,
        _result: &TestResult,
    ) -> LedgerResult<u64> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(1)
    }

    async fn close_run(&self, _run: RunId, _result: &FullResult) -> LedgerResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
