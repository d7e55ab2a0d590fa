//! Public types for the runledger API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Harness payloads
pub use runledger_core::{
    FullResult, NodeBuffer, OutputChunk, TestCase, TestError, TestResult,
};

// Identity and status
pub use runledger_core::{RunId, RunOutcome, RunStatus, TestStatus};

// Port, errors and serialized events
pub use runledger_core::{LedgerError, LedgerResult, LifecycleEvent, RunStore};

// Storage
pub use runledger_storage::{RunRecord, SqliteStore, TestRecord};

// Engine
pub use runledger_engine::{dispatch, replay, Reporter, RunSynchronizer, SyncOptions, SyncPhase};
