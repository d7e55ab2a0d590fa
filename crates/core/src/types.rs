//! Core types for persisted runs and tests
//!
//! This module defines the identity and status types stored in the ledger:
//! - [`RunId`]: store-assigned identifier of a test run
//! - [`RunStatus`]: lifecycle status of a run row
//! - [`RunOutcome`]: aggregate status a harness reports when a run ends
//! - [`TestStatus`]: outcome of a single test execution
//!
//! Status values are persisted as the harness spells them (`"timedOut"`, not
//! `"timed-out"`), so rows written by other reporters remain comparable.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a run row, assigned by the store on insert
///
/// Run ids are allocated by the store's autoincrement key and are therefore
/// monotonically increasing per store. A usable id is always positive; the
/// store reporting `0` or a negative rowid means allocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(i64);

impl RunId {
    /// Wrap a raw store identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use runledger_core::RunId;
    ///
    /// let id = RunId::new(7);
    /// assert_eq!(id.as_i64(), 7);
    /// assert!(id.is_allocated());
    /// ```
    pub const fn new(raw: i64) -> Self {
        RunId(raw)
    }

    /// Raw value as stored in `test_runs.id`
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Whether this id can address a row
    pub const fn is_allocated(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a run row
///
/// A run is `Running` from the moment it is opened until the harness reports
/// the aggregate outcome on run-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    /// Opened, not yet closed
    Running,
    /// All tests passed
    Passed,
    /// At least one test failed
    Failed,
    /// The global timeout was reached
    TimedOut,
    /// The run was interrupted before completion
    Interrupted,
}

impl RunStatus {
    /// Get string representation as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Passed => "passed",
            RunStatus::Failed => "failed",
            RunStatus::TimedOut => "timedOut",
            RunStatus::Interrupted => "interrupted",
        }
    }

    /// Check if the run is still open
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(RunStatus::Running),
            "passed" => Ok(RunStatus::Passed),
            "failed" => Ok(RunStatus::Failed),
            "timedOut" => Ok(RunStatus::TimedOut),
            "interrupted" => Ok(RunStatus::Interrupted),
            other => Err(LedgerError::store(
                "decode run status",
                format!("unknown run status '{}'", other),
            )),
        }
    }
}

/// Aggregate outcome reported by the harness on run-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunOutcome {
    /// All tests passed
    Passed,
    /// At least one test failed
    Failed,
    /// The global timeout was reached
    TimedOut,
    /// The run was interrupted
    Interrupted,
}

impl RunOutcome {
    /// Get string representation as persisted
    pub fn as_str(&self) -> &'static str {
        RunStatus::from(*self).as_str()
    }
}

impl From<RunOutcome> for RunStatus {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Passed => RunStatus::Passed,
            RunOutcome::Failed => RunStatus::Failed,
            RunOutcome::TimedOut => RunStatus::TimedOut,
            RunOutcome::Interrupted => RunStatus::Interrupted,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single test execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test exceeded its timeout
    TimedOut,
    /// Test was skipped
    Skipped,
    /// Test was interrupted
    Interrupted,
}

impl TestStatus {
    /// Get string representation as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::TimedOut => "timedOut",
            TestStatus::Skipped => "skipped",
            TestStatus::Interrupted => "interrupted",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(TestStatus::Passed),
            "failed" => Ok(TestStatus::Failed),
            "timedOut" => Ok(TestStatus::TimedOut),
            "skipped" => Ok(TestStatus::Skipped),
            "interrupted" => Ok(TestStatus::Interrupted),
            other => Err(LedgerError::store(
                "decode test status",
                format!("unknown test status '{}'", other),
            )),
        }
    }
}
