//! Unified error type for runledger.
//!
//! Wraps ledger errors from the store and synchronizer together with the
//! configuration failures that only the facade can produce.

use runledger_core::LedgerError;
use thiserror::Error;

/// All runledger errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Store, allocation or lifecycle error
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Invalid configuration value or file
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the store rejected or could not execute an operation.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Ledger(e) if e.is_store_failure())
    }

    /// Check if the recorder can no longer correlate mutations.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Ledger(e) if e.is_fatal())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
