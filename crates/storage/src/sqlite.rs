//! SQLite implementation of [`RunStore`]
//!
//! A single connection is shared by every mutation. rusqlite is synchronous,
//! so each operation runs on `tokio::task::spawn_blocking` and holds the
//! connection lock for exactly one statement (or one DDL batch). This makes
//! concurrent `register_test` / `record_test_result` calls safe to interleave
//! without pooling or explicit transactions.

use crate::records::{
    decode_run, decode_test, now_timestamp, RunRecord, RunRow, TestRecord, TestRow,
};
use crate::schema;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use runledger_core::{
    FullResult, LedgerError, LedgerResult, RunId, RunStatus, RunStore, TestCase, TestResult,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// SQLite-backed run store
///
/// Cloning is cheap and every clone shares the same connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file
    ///
    /// Missing parent directories are created. File-backed databases use WAL
    /// journaling. The schema is not touched; call
    /// [`RunStore::create_schema`] before writing.
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LedgerError::store(
                        "create database directory",
                        format!("{}: {}", parent.display(), e),
                    )
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| LedgerError::store("open database", e.to_string()))?;

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(|e| LedgerError::store("set journal_mode", e.to_string()))?;
        debug!(path = %path.display(), journal_mode = %journal_mode, "Opened run store");

        Self::configure(conn)
    }

    /// Open a private in-memory database
    ///
    /// All data is lost when the last clone is dropped.
    pub fn open_in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LedgerError::store("open database", e.to_string()))?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> LedgerResult<Self> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            "#,
        )
        .map_err(|e| LedgerError::store("configure pragmas", e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<F, R>(&self, operation: &'static str, f: F) -> LedgerResult<R>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            f(&guard)
        })
        .await
        .map_err(|e| LedgerError::store(operation, format!("blocking task failed: {}", e)))?
        .map_err(|e| LedgerError::store(operation, e.to_string()))
    }

    // =========================================================================
    // Read-back
    // =========================================================================

    /// Fetch a run row
    pub async fn run(&self, run: RunId) -> LedgerResult<Option<RunRecord>> {
        let raw = self
            .with_conn("get run", move |conn| {
                conn.query_row(schema::SELECT_RUN, params![run.as_i64()], |row| {
                    let raw: RunRow = (row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?);
                    Ok(raw)
                })
                .optional()
            })
            .await?;
        raw.map(decode_run).transpose()
    }

    /// Fetch every test row of a run, in registration order
    pub async fn tests_for_run(&self, run: RunId) -> LedgerResult<Vec<TestRecord>> {
        let rows = self
            .with_conn("list tests", move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TESTS_FOR_RUN)?;
                let rows = stmt
                    .query_map(params![run.as_i64()], |row| {
                        Ok((
                            row.get(0)?,
                            row.get(1)?,
                            row.get(2)?,
                            row.get(3)?,
                            row.get(4)?,
                            row.get(5)?,
                            row.get(6)?,
                            row.get(7)?,
                            row.get(8)?,
                            row.get(9)?,
                        ))
                    })?
                    .collect::<rusqlite::Result<Vec<TestRow>>>()?;
                Ok(rows)
            })
            .await?;
        rows.into_iter().map(decode_test).collect()
    }

    /// Number of run rows in the store
    pub async fn run_count(&self) -> LedgerResult<u64> {
        let count: i64 = self
            .with_conn("count runs", |conn| {
                conn.query_row(schema::COUNT_RUNS, [], |row| row.get(0))
            })
            .await?;
        Ok(count.max(0) as u64)
    }

    /// Names of user tables, sorted
    pub async fn table_names(&self) -> LedgerResult<Vec<String>> {
        self.with_conn("list tables", |conn| {
            let mut stmt = conn.prepare(schema::SELECT_TABLE_NAMES)?;
            let names = stmt
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(names)
        })
        .await
    }
}

#[async_trait]
impl RunStore for SqliteStore {
    async fn drop_schema(&self) -> LedgerResult<()> {
        self.with_conn("drop schema", |conn| conn.execute_batch(schema::DROP_SCHEMA))
            .await?;
        debug!("Dropped run ledger tables");
        Ok(())
    }

    async fn create_schema(&self) -> LedgerResult<()> {
        self.with_conn("create schema", |conn| conn.execute_batch(schema::CREATE_SCHEMA))
            .await
    }

    async fn open_run(&self) -> LedgerResult<RunId> {
        let started_at = now_timestamp();
        let rowid = self
            .with_conn("open run", move |conn| {
                conn.execute(
                    schema::INSERT_RUN,
                    params![RunStatus::Running.as_str(), started_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        let run_id = RunId::new(rowid);
        if !run_id.is_allocated() {
            return Err(LedgerError::run_allocation(format!(
                "store returned rowid {}",
                rowid
            )));
        }
        info!(run_id = %run_id, "Opened test run");
        Ok(run_id)
    }

    async fn register_test(&self, run: RunId, test: &TestCase) -> LedgerResult<()> {
        let title = test.title.clone();
        let history_id = test.id.clone();
        let inserted = self
            .with_conn("register test", move |conn| {
                conn.execute(schema::INSERT_TEST, params![run.as_i64(), title, history_id])
            })
            .await?;
        debug!(run_id = %run, history_id = %test.id, inserted, "Registered test");
        Ok(())
    }

    async fn record_test_result(
        &self,
        run: RunId,
        test: &TestCase,
        result: &TestResult,
    ) -> LedgerResult<u64> {
        let status = result.status.as_str();
        let duration = i64::try_from(result.duration_ms).map_err(|_| {
            LedgerError::store(
                "record test result",
                format!("duration {}ms does not fit a SQLite integer", result.duration_ms),
            )
        })?;
        let error = result.error_message().to_string();
        let stdout = result.stdout_text();
        let stderr = result.stderr_text();
        let retry = i64::from(result.retry);
        let history_id = test.id.clone();

        let rows = self
            .with_conn("record test result", move |conn| {
                conn.execute(
                    schema::UPDATE_TEST,
                    params![
                        status,
                        duration,
                        error,
                        stdout,
                        stderr,
                        retry,
                        history_id,
                        run.as_i64()
                    ],
                )
            })
            .await?;
        debug!(run_id = %run, history_id = %test.id, rows, "Recorded test result");
        Ok(rows as u64)
    }

    async fn close_run(&self, run: RunId, result: &FullResult) -> LedgerResult<()> {
        let status = result.status.as_str();
        let ended_at = now_timestamp();
        let rows = self
            .with_conn("close run", move |conn| {
                conn.execute(schema::CLOSE_RUN, params![status, ended_at, run.as_i64()])
            })
            .await?;
        if rows == 0 {
            return Err(LedgerError::store("close run", format!("run {} not found", run)));
        }
        info!(run_id = %run, status, "Closed test run");
        Ok(())
    }
}
