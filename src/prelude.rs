//! Convenient imports for runledger.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use runledger::prelude::*;
//!
//! let recorder = Recorder::ephemeral().await?;
//! recorder.on_begin().await?;
//! ```

// Main entry point
pub use crate::recorder::{Recorder, RecorderBuilder};
pub use crate::config::RecorderConfig;

// Error handling
pub use crate::error::{Error, Result};

// Harness hooks
pub use crate::types::Reporter;

// Harness payloads
pub use crate::types::{FullResult, TestCase, TestResult};

// Status types
pub use crate::types::{RunId, RunOutcome, RunStatus, TestStatus};
