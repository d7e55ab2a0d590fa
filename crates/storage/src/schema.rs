//! Persisted schema
//!
//! Three tables, stable across reporters writing to the same database:
//!
//! ```text
//! test_runs   (id, status, start_time, end_time)
//! tests       (id, history_id, run_id -> test_runs, title, status, duration,
//!              error, stdout, stderr, retry)
//! attachments (id, test_id -> tests, name, path, body, content_type,
//!              is_screenshot, is_video)
//! ```
//!
//! Every statement is guarded (`IF NOT EXISTS` / `IF EXISTS`) so both
//! directions are idempotent.

/// Table names in creation order
pub const TABLES: [&str; 3] = ["test_runs", "tests", "attachments"];

/// Create all tables and the correlation index
pub const CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS test_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    status TEXT,
    start_time TIMESTAMP,
    end_time TIMESTAMP
);

CREATE TABLE IF NOT EXISTS tests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    history_id TEXT,
    run_id INTEGER REFERENCES test_runs(id),
    title TEXT,
    status TEXT,
    duration INTEGER,
    error TEXT,
    stdout TEXT,
    stderr TEXT,
    retry INTEGER
);

CREATE TABLE IF NOT EXISTS attachments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    test_id INTEGER REFERENCES tests(id),
    name TEXT,
    path TEXT,
    body BLOB,
    content_type TEXT,
    is_screenshot BOOLEAN,
    is_video BOOLEAN
);

CREATE INDEX IF NOT EXISTS idx_tests_history_run ON tests(history_id, run_id);
"#;

/// Drop all tables, children first so foreign keys never dangle
pub const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS attachments;
DROP TABLE IF EXISTS tests;
DROP TABLE IF EXISTS test_runs;
"#;

pub(crate) const INSERT_RUN: &str =
    "INSERT INTO test_runs (status, start_time) VALUES (?1, ?2)";

// One row per (history_id, run_id): a retried test reuses its row.
pub(crate) const INSERT_TEST: &str = "INSERT INTO tests (run_id, title, history_id) \
     SELECT ?1, ?2, ?3 \
     WHERE NOT EXISTS (SELECT 1 FROM tests WHERE history_id = ?3 AND run_id = ?1)";

pub(crate) const UPDATE_TEST: &str = "UPDATE tests \
     SET status = ?1, duration = ?2, error = ?3, stdout = ?4, stderr = ?5, retry = ?6 \
     WHERE history_id = ?7 AND run_id = ?8";

pub(crate) const CLOSE_RUN: &str =
    "UPDATE test_runs SET status = ?1, end_time = ?2 WHERE id = ?3";

pub(crate) const SELECT_RUN: &str =
    "SELECT id, status, start_time, end_time FROM test_runs WHERE id = ?1";

pub(crate) const SELECT_TESTS_FOR_RUN: &str = "SELECT id, history_id, run_id, title, status, \
     duration, error, stdout, stderr, retry FROM tests WHERE run_id = ?1 ORDER BY id";

pub(crate) const COUNT_RUNS: &str = "SELECT COUNT(*) FROM test_runs";

pub(crate) const SELECT_TABLE_NAMES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";
