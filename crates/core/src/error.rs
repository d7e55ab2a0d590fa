//! Error types for the ledger
//!
//! | Variant | Meaning | Recoverable |
//! |---------|---------|-------------|
//! | `Store` | The store rejected or could not execute a mutation | Harness decides |
//! | `RunAllocation` | Opening a run yielded no usable identifier | No |
//! | `RunClosed` | A lifecycle event arrived after the run was closed | No |
//! | `RunActive` | Schema reset requested once a run exists | Yes |
//!
//! A result recorded for a test that was never registered is not an error:
//! the update affects zero rows and the store reports the count.

use crate::types::RunId;
use thiserror::Error;

/// All ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The store rejected or could not execute an operation
    #[error("store failure during {operation}: {message}")]
    Store {
        /// Operation that failed (e.g. "open run")
        operation: String,
        /// Underlying error text
        message: String,
    },

    /// Opening a run did not yield a usable identifier
    #[error("run allocation failed: {reason}")]
    RunAllocation {
        /// Why the identifier is unusable
        reason: String,
    },

    /// A lifecycle event arrived after the run was closed
    #[error("run {run_id} is already closed")]
    RunClosed {
        /// The closed run
        run_id: RunId,
    },

    /// The schema cannot be reset once a run has been opened
    #[error("run {run_id} already exists; schema reset refused")]
    RunActive {
        /// The open (or closed) run
        run_id: RunId,
    },
}

/// Result type for ledger operations
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    /// Create a store failure
    pub fn store(operation: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::Store {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a run allocation failure
    pub fn run_allocation(reason: impl Into<String>) -> Self {
        LedgerError::RunAllocation {
            reason: reason.into(),
        }
    }

    /// Check if this is a store failure
    pub fn is_store_failure(&self) -> bool {
        matches!(self, LedgerError::Store { .. })
    }

    /// Check if this error leaves the synchronizer unable to correlate
    /// further mutations
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LedgerError::RunAllocation { .. } | LedgerError::RunClosed { .. }
        )
    }
}
