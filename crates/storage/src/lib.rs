//! Storage layer for runledger
//!
//! This crate implements the [`RunStore`](runledger_core::RunStore) port over
//! SQLite:
//! - `schema`: DDL for the `test_runs`, `tests` and `attachments` tables
//! - `SqliteStore`: a shared connection driven from `spawn_blocking`
//! - `records`: typed read-back of persisted rows

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod records;
pub mod schema;
pub mod sqlite;

pub use records::{RunRecord, TestRecord};
pub use sqlite::SqliteStore;
