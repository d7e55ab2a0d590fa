//! Main entry point for runledger.
//!
//! This module provides the `Recorder`, a ready-to-use reporter that persists
//! a test run into SQLite.

use crate::config::RecorderConfig;
use crate::error::Result;
use async_trait::async_trait;
use runledger_core::{FullResult, LedgerResult, RunStore, TestCase, TestResult};
use runledger_engine::{Reporter, RunSynchronizer, SyncOptions, SyncPhase};
use runledger_storage::SqliteStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A test-run recorder.
///
/// Hand it to the harness as its [`Reporter`]. Create one with
/// [`Recorder::open`], [`Recorder::ephemeral`] or [`Recorder::builder`].
///
/// # Example
///
/// ```ignore
/// use runledger::prelude::*;
///
/// let recorder = Recorder::open("target/test-results.sqlite").await?;
///
/// recorder.on_begin().await?;
/// let test = TestCase::new("h1", "adds numbers");
/// recorder.on_test_begin(&test).await?;
/// recorder.on_test_end(&test, &TestResult::new(TestStatus::Passed, 12)).await?;
/// recorder.on_end(&FullResult::new(RunOutcome::Passed)).await?;
/// ```
pub struct Recorder {
    sync: RunSynchronizer,
    sqlite: Option<SqliteStore>,
}

impl Recorder {
    /// Open a recorder backed by the SQLite file at `path`.
    ///
    /// Creates the schema if absent. Existing rows are kept.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open().await
    }

    /// Open a recorder backed by a private in-memory database.
    ///
    /// Use this for tests; everything is lost when the recorder is dropped.
    pub async fn ephemeral() -> Result<Self> {
        Self::builder().in_memory().open().await
    }

    /// Create a builder for recorder configuration.
    pub fn builder() -> RecorderBuilder {
        RecorderBuilder::new()
    }

    /// Wrap an externally supplied store.
    ///
    /// The schema is prepared before returning, dropping existing tables first
    /// when `drop_tables` is set.
    pub async fn with_store(store: Arc<dyn RunStore>, drop_tables: bool) -> Result<Self> {
        let sync = RunSynchronizer::new(
            store,
            SyncOptions {
                drop_schema: drop_tables,
            },
        );
        sync.initialize().await?;
        Ok(Self { sync, sqlite: None })
    }

    /// The SQLite store, when this recorder owns one.
    ///
    /// Recorders created with [`Recorder::with_store`] return `None`.
    pub fn sqlite_store(&self) -> Option<&SqliteStore> {
        self.sqlite.as_ref()
    }

    /// The underlying synchronizer.
    pub fn synchronizer(&self) -> &RunSynchronizer {
        &self.sync
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SyncPhase {
        self.sync.phase()
    }
}

#[async_trait]
impl Reporter for Recorder {
    async fn on_begin(&self) -> LedgerResult<()> {
        self.sync.on_begin().await
    }

    async fn on_test_begin(&self, test: &TestCase) -> LedgerResult<()> {
        self.sync.on_test_begin(test).await
    }

    async fn on_test_end(&self, test: &TestCase, result: &TestResult) -> LedgerResult<()> {
        self.sync.on_test_end(test, result).await
    }

    async fn on_end(&self, result: &FullResult) -> LedgerResult<()> {
        self.sync.on_end(result).await
    }
}

/// Builder for recorder configuration.
///
/// # Example
///
/// ```ignore
/// // Configured from runledger.toml and the environment, with a fresh schema
/// let config = RecorderConfig::from_file("runledger.toml")?.with_env_overrides()?;
/// let recorder = Recorder::builder()
///     .config(config)
///     .drop_tables(true)
///     .open()
///     .await?;
///
/// // Unit testing: no disk at all
/// let recorder = Recorder::ephemeral().await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecorderBuilder {
    config: RecorderConfig,
}

impl RecorderBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings with `config`.
    pub fn config(mut self, config: RecorderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the database file path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.database = path.as_ref().to_path_buf();
        self
    }

    /// Use a private in-memory database.
    pub fn in_memory(mut self) -> Self {
        self.config.database = crate::config::IN_MEMORY.into();
        self
    }

    /// Drop existing tables when opening.
    pub fn drop_tables(mut self, drop_tables: bool) -> Self {
        self.config.drop_tables = drop_tables;
        self
    }

    /// The settings this builder will open with.
    pub fn settings(&self) -> &RecorderConfig {
        &self.config
    }

    /// Open the store and prepare its schema.
    pub async fn open(self) -> Result<Recorder> {
        let store = if self.config.is_in_memory() {
            SqliteStore::open_in_memory()?
        } else {
            SqliteStore::open(&self.config.database)?
        };

        let sync = RunSynchronizer::new(
            Arc::new(store.clone()),
            SyncOptions {
                drop_schema: self.config.drop_tables,
            },
        );
        sync.initialize().await?;
        info!(
            database = %self.config.database.display(),
            drop_tables = self.config.drop_tables,
            "Recorder ready"
        );

        Ok(Recorder {
            sync,
            sqlite: Some(store),
        })
    }
}
