//! # runledger
//!
//! Persist the lifecycle of a test run (run metadata, test outcomes and the
//! attachment schema) into a relational store, driven by a test harness's
//! reporter callbacks.
//!
//! ## Quick Start
//!
//! ```ignore
//! use runledger::prelude::*;
//!
//! // Open (or create) the ledger
//! let recorder = Recorder::open("target/test-results.sqlite").await?;
//!
//! // The harness drives the four hooks
//! recorder.on_begin().await?;
//! let test = TestCase::new("suite-a-adds", "adds numbers");
//! recorder.on_test_begin(&test).await?;
//! recorder.on_test_end(&test, &TestResult::new(TestStatus::Passed, 12)).await?;
//! recorder.on_end(&FullResult::new(RunOutcome::Passed)).await?;
//! ```
//!
//! ## Layers
//!
//! - [`RunStore`] - the persistence port (`runledger-core`)
//! - [`SqliteStore`] - the SQLite implementation (`runledger-storage`)
//! - [`RunSynchronizer`] - lifecycle-to-mutation mapping (`runledger-engine`)
//! - [`Recorder`] - all of the above, configured and ready

#![warn(missing_docs)]

mod config;
mod error;
mod recorder;
mod types;

pub mod prelude;

// Re-export main entry points
pub use config::{RecorderConfig, ENV_DATABASE, ENV_DROP_TABLES, IN_MEMORY};
pub use error::{Error, Result};
pub use recorder::{Recorder, RecorderBuilder};

// Re-export types
pub use types::*;
