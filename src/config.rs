//! Recorder configuration.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. Defaults
//! 2. An optional TOML file ([`RecorderConfig::from_file`])
//! 3. Environment ([`RecorderConfig::with_env_overrides`])
//! 4. Builder calls
//!
//! ```toml
//! database = "target/test-results.sqlite"
//! drop_tables = false
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the database file
pub const ENV_DATABASE: &str = "RUNLEDGER_DATABASE";

/// Environment variable enabling `drop_tables`
pub const ENV_DROP_TABLES: &str = "RUNLEDGER_DROP_TABLES";

/// Path that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Settings for opening a [`Recorder`](crate::Recorder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// SQLite database file, or `:memory:`
    pub database: PathBuf,
    /// Drop existing tables when the recorder is opened
    pub drop_tables: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("runledger.sqlite"),
            drop_tables: false,
        }
    }
}

impl RecorderConfig {
    /// Parse a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&raw)
    }

    /// Parse TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `RUNLEDGER_DATABASE` and `RUNLEDGER_DROP_TABLES` if set.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(database) = lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            self.database = PathBuf::from(database);
        }
        if let Some(flag) = lookup(ENV_DROP_TABLES) {
            self.drop_tables = parse_flag(ENV_DROP_TABLES, &flag)?;
        }
        Ok(self)
    }

    /// Whether the configured database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database == Path::new(IN_MEMORY)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
