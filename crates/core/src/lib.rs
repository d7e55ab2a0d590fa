//! Core types and contracts for runledger
//!
//! This crate defines the vocabulary shared by every other layer:
//! - [`RunId`], [`RunStatus`], [`TestStatus`]: identity and status of persisted rows
//! - [`TestCase`], [`TestResult`], [`FullResult`]: the payloads a test harness reports
//! - [`RunStore`]: the persistence port a concrete store implements
//! - [`LifecycleEvent`]: a serializable form of the four harness hooks
//! - [`LedgerError`]: the error type for all of the above

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod harness;
pub mod port;
pub mod types;

pub use error::{LedgerError, LedgerResult};
pub use event::LifecycleEvent;
pub use harness::{FullResult, NodeBuffer, OutputChunk, TestCase, TestError, TestResult};
pub use port::RunStore;
pub use types::{RunId, RunOutcome, RunStatus, TestStatus};
