//! Persistence port
//!
//! [`RunStore`] is the contract a relational store implements so the run
//! synchronizer can persist a test run. It carries no logic: the synchronizer
//! decides when each operation is issued and owns the run identifier, which is
//! passed explicitly to every run-scoped operation.
//!
//! ## Contract
//!
//! - `create_schema` and `drop_schema` are idempotent
//! - `create_schema` never destroys existing rows
//! - `open_run` allocates a fresh, monotonically increasing [`RunId`]
//! - `register_test` inserts at most one row per `(history_id, run_id)`
//! - `record_test_result` addresses rows by `(history_id, run_id)`, never by
//!   primary key, and reports how many rows it touched
//!
//! ## Errors
//!
//! Every operation fails only with [`LedgerError::Store`](crate::LedgerError::Store),
//! except `open_run`, which may also report
//! [`LedgerError::RunAllocation`](crate::LedgerError::RunAllocation).

use crate::error::LedgerResult;
use crate::harness::{FullResult, TestCase, TestResult};
use crate::types::RunId;
use async_trait::async_trait;

/// Operations a store must support to persist a test run
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Remove the `test_runs`, `tests` and `attachments` tables if present
    async fn drop_schema(&self) -> LedgerResult<()>;

    /// Create the three tables if absent
    async fn create_schema(&self) -> LedgerResult<()>;

    /// Insert a run with status `running` and the current start time
    async fn open_run(&self) -> LedgerResult<RunId>;

    /// Insert a test row linked to `run`
    ///
    /// Outcome columns are left unset. Registering the same history id twice
    /// under one run inserts nothing the second time.
    async fn register_test(&self, run: RunId, test: &TestCase) -> LedgerResult<()>;

    /// Update the row registered for `(test.id, run)` with the final outcome
    ///
    /// Returns the number of rows updated. Zero means the test was never
    /// registered under this run.
    async fn record_test_result(
        &self,
        run: RunId,
        test: &TestCase,
        result: &TestResult,
    ) -> LedgerResult<u64>;

    /// Set the run's aggregate status and end time
    async fn close_run(&self, run: RunId, result: &FullResult) -> LedgerResult<()>;
}
