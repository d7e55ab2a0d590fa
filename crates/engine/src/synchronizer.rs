//! Run synchronizer
//!
//! Maps harness lifecycle events onto [`RunStore`] mutations and owns the run
//! identifier that correlates them.
//!
//! ## Phases
//!
//! ```text
//! NoRun --[first event]--> RunOpen --[on_end]--> RunClosed
//! ```
//!
//! Any event observed in `NoRun` opens the run first (lazy open), so a harness
//! that skips `on_begin` still gets a valid run row to link tests to and to
//! close. Events after `on_end` are rejected with `RunClosed`.
//!
//! ## Single run per synchronizer
//!
//! The run id lives in a `tokio::sync::OnceCell`. Callers racing to open the
//! run share one in-flight `open_run` future; exactly one mutation is issued
//! and every caller observes the id it produced. A store failure leaves the
//! cell empty, so the next event opens again. An unusable id is fatal and
//! sticky: no later event issues another mutation.

use crate::reporter::Reporter;
use async_trait::async_trait;
use runledger_core::{
    FullResult, LedgerError, LedgerResult, RunId, RunStore, TestCase, TestResult,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Options applied by [`RunSynchronizer::initialize`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Drop existing tables before creating the schema
    pub drop_schema: bool,
}

/// Observable phase of a synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No run has been opened yet
    NoRun,
    /// A run is open and accepting test events
    RunOpen(RunId),
    /// The run was closed by `on_end`
    RunClosed(RunId),
}

impl SyncPhase {
    /// Run id, if one has been allocated
    pub fn run_id(&self) -> Option<RunId> {
        match self {
            SyncPhase::NoRun => None,
            SyncPhase::RunOpen(id) | SyncPhase::RunClosed(id) => Some(*id),
        }
    }
}

/// Persists one test run into a [`RunStore`]
pub struct RunSynchronizer {
    store: Arc<dyn RunStore>,
    options: SyncOptions,
    run_id: OnceCell<RunId>,
    closed: AtomicBool,
    allocation_failed: AtomicBool,
}

impl RunSynchronizer {
    /// Create a synchronizer in phase `NoRun`
    ///
    /// Construction performs no I/O. Call [`initialize`](Self::initialize)
    /// to apply [`SyncOptions`] before the harness starts emitting events.
    pub fn new(store: Arc<dyn RunStore>, options: SyncOptions) -> Self {
        Self {
            store,
            options,
            run_id: OnceCell::new(),
            closed: AtomicBool::new(false),
            allocation_failed: AtomicBool::new(false),
        }
    }

    /// Prepare the schema: drop it first if configured, then create it
    ///
    /// Only valid in `NoRun`. Once a run id exists its rows must survive, so
    /// a later call fails with `RunActive` and touches nothing.
    pub async fn initialize(&self) -> LedgerResult<()> {
        if let Some(run_id) = self.run_id() {
            return Err(LedgerError::RunActive { run_id });
        }
        if self.options.drop_schema {
            self.store.drop_schema().await?;
        }
        self.store.create_schema().await
    }

    /// The options this synchronizer was built with
    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// The injected store
    pub fn store(&self) -> &Arc<dyn RunStore> {
        &self.store
    }

    /// Current phase
    pub fn phase(&self) -> SyncPhase {
        match self.run_id.get() {
            None => SyncPhase::NoRun,
            Some(id) if self.closed.load(Ordering::Acquire) => SyncPhase::RunClosed(*id),
            Some(id) => SyncPhase::RunOpen(*id),
        }
    }

    /// Run id, if one has been allocated
    pub fn run_id(&self) -> Option<RunId> {
        self.run_id.get().copied()
    }

    /// Return the open run, opening it on first need
    async fn ensure_run(&self) -> LedgerResult<RunId> {
        if let SyncPhase::RunClosed(run_id) = self.phase() {
            return Err(LedgerError::RunClosed { run_id });
        }
        let run_id = self.run_id.get_or_try_init(|| self.allocate_run()).await?;
        Ok(*run_id)
    }

    async fn allocate_run(&self) -> LedgerResult<RunId> {
        if self.allocation_failed.load(Ordering::Acquire) {
            return Err(LedgerError::run_allocation(
                "an earlier attempt to open the run failed",
            ));
        }

        match self.store.open_run().await {
            Ok(run_id) if run_id.is_allocated() => Ok(run_id),
            Ok(run_id) => {
                self.allocation_failed.store(true, Ordering::Release);
                Err(LedgerError::run_allocation(format!(
                    "store returned unusable run id {}",
                    run_id
                )))
            }
            Err(e @ LedgerError::RunAllocation { .. }) => {
                self.allocation_failed.store(true, Ordering::Release);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

impl fmt::Debug for RunSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunSynchronizer")
            .field("options", &self.options)
            .field("phase", &self.phase())
            .finish()
    }
}

#[async_trait]
impl Reporter for RunSynchronizer {
    async fn on_begin(&self) -> LedgerResult<()> {
        match self.phase() {
            SyncPhase::RunOpen(_) => return Ok(()),
            SyncPhase::RunClosed(run_id) => return Err(LedgerError::RunClosed { run_id }),
            SyncPhase::NoRun => {}
        }
        self.store.create_schema().await?;
        self.ensure_run().await?;
        Ok(())
    }

    async fn on_test_begin(&self, test: &TestCase) -> LedgerResult<()> {
        let run_id = self.ensure_run().await?;
        self.store.register_test(run_id, test).await
    }

    async fn on_test_end(&self, test: &TestCase, result: &TestResult) -> LedgerResult<()> {
        let run_id = self.ensure_run().await?;
        let rows = self.store.record_test_result(run_id, test, result).await?;
        if rows == 0 {
            warn!(
                run_id = %run_id,
                history_id = %test.id,
                "Test result matched no registered test"
            );
        }
        Ok(())
    }

    async fn on_end(&self, result: &FullResult) -> LedgerResult<()> {
        let run_id = self.ensure_run().await?;
        self.store.close_run(run_id, result).await?;
        self.closed.store(true, Ordering::Release);
        debug!(run_id = %run_id, status = %result.status, "Run synchronizer closed");
        Ok(())
    }
}
