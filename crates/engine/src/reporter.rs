//! Harness-facing lifecycle hooks
//!
//! A harness owns the reporter and calls these hooks in order:
//!
//! ```text
//! on_begin --> (on_test_begin --> on_test_end)* --> on_end
//! ```
//!
//! Test pairs may overlap when tests run concurrently, so every hook takes
//! `&self`. A returned error is the harness's to report; reporters do not
//! retry.

use async_trait::async_trait;
use runledger_core::{FullResult, LedgerResult, TestCase, TestResult};

/// The four lifecycle callbacks of a test harness
#[async_trait]
pub trait Reporter: Send + Sync {
    /// The run started
    async fn on_begin(&self) -> LedgerResult<()>;

    /// A test started
    async fn on_test_begin(&self, test: &TestCase) -> LedgerResult<()>;

    /// A test finished
    async fn on_test_end(&self, test: &TestCase, result: &TestResult) -> LedgerResult<()>;

    /// The run finished
    async fn on_end(&self, result: &FullResult) -> LedgerResult<()>;
}
