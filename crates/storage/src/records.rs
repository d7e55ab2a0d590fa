//! Typed views of persisted rows
//!
//! Rows are read as raw column values inside the blocking section and decoded
//! afterwards, so decode failures surface as store failures rather than
//! SQLite errors.

use chrono::{DateTime, SecondsFormat, Utc};
use runledger_core::{LedgerError, LedgerResult, RunId, RunStatus, TestStatus};

/// A row of `test_runs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    /// Store-assigned id
    pub id: RunId,
    /// Current status
    pub status: RunStatus,
    /// When the run was opened
    pub start_time: DateTime<Utc>,
    /// When the run was closed, if it has been
    pub end_time: Option<DateTime<Utc>>,
}

impl RunRecord {
    /// Check if the run has been closed
    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }
}

/// A row of `tests`
///
/// Outcome columns are `None` until a result is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    /// Store-assigned id, never used for correlation
    pub id: i64,
    /// Harness history id
    pub history_id: String,
    /// Owning run
    pub run_id: RunId,
    /// Display title
    pub title: String,
    /// Outcome of the latest recorded attempt
    pub status: Option<TestStatus>,
    /// Duration in milliseconds
    pub duration_ms: Option<i64>,
    /// Error message, empty when the test had none
    pub error: Option<String>,
    /// Captured standard output
    pub stdout: Option<String>,
    /// Captured standard error
    pub stderr: Option<String>,
    /// Retry index of the latest recorded attempt
    pub retry: Option<i64>,
}

impl TestRecord {
    /// Check if a result has been recorded for this row
    pub fn has_result(&self) -> bool {
        self.status.is_some()
    }
}

pub(crate) type RunRow = (i64, String, String, Option<String>);

pub(crate) type TestRow = (
    i64,
    String,
    i64,
    String,
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i64>,
);

pub(crate) fn decode_run(row: RunRow) -> LedgerResult<RunRecord> {
    let (id, status, start_time, end_time) = row;
    Ok(RunRecord {
        id: RunId::new(id),
        status: status.parse()?,
        start_time: parse_timestamp(&start_time)?,
        end_time: end_time.as_deref().map(parse_timestamp).transpose()?,
    })
}

pub(crate) fn decode_test(row: TestRow) -> LedgerResult<TestRecord> {
    let (id, history_id, run_id, title, status, duration_ms, error, stdout, stderr, retry) = row;
    Ok(TestRecord {
        id,
        history_id,
        run_id: RunId::new(run_id),
        title,
        status: status.as_deref().map(str::parse).transpose()?,
        duration_ms,
        error,
        stdout,
        stderr,
        retry,
    })
}

/// Current time in the persisted format (`2024-01-01T00:00:00.000Z`)
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> LedgerResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| LedgerError::store("decode timestamp", format!("'{}': {}", raw, e)))
}
