//! Payloads reported by the test harness
//!
//! These mirror what a harness hands to its reporter hooks. Only the fields
//! the ledger persists are modelled.

use crate::types::{RunOutcome, TestStatus};
use serde::{Deserialize, Serialize};

/// A test case as identified by the harness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// History id: stable across retries and across runs
    pub id: String,
    /// Display title
    pub title: String,
}

impl TestCase {
    /// Create a test case
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Error attached to a failed test result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestError {
    /// Error message, if the harness captured one
    #[serde(default)]
    pub message: Option<String>,
}

/// One captured chunk of test output
///
/// Harnesses deliver output as either text or raw bytes. Bytes arrive as a
/// plain array or in the `{"type": "Buffer", "data": [...]}` form that
/// `JSON.stringify` produces for a Node `Buffer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputChunk {
    /// UTF-8 text
    Text(String),
    /// Raw bytes, decoded lossily when persisted
    Bytes(Vec<u8>),
    /// Bytes wrapped as a serialized Node `Buffer`
    Buffer(NodeBuffer),
}

/// Serialized Node `Buffer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeBuffer {
    /// `{"type": "Buffer", "data": [...]}`
    Buffer {
        /// Buffer contents
        data: Vec<u8>,
    },
}

impl OutputChunk {
    fn push_to(&self, out: &mut String) {
        match self {
            OutputChunk::Text(text) => out.push_str(text),
            OutputChunk::Bytes(bytes) | OutputChunk::Buffer(NodeBuffer::Buffer { data: bytes }) => {
                out.push_str(&String::from_utf8_lossy(bytes))
            }
        }
    }
}

impl From<&str> for OutputChunk {
    fn from(text: &str) -> Self {
        OutputChunk::Text(text.to_string())
    }
}

impl From<Vec<u8>> for OutputChunk {
    fn from(bytes: Vec<u8>) -> Self {
        OutputChunk::Bytes(bytes)
    }
}

/// Result of a single test execution attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Outcome of this attempt
    pub status: TestStatus,
    /// Wall time in milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    /// Error, if any
    #[serde(default)]
    pub error: Option<TestError>,
    /// Captured standard output
    #[serde(default)]
    pub stdout: Vec<OutputChunk>,
    /// Captured standard error
    #[serde(default)]
    pub stderr: Vec<OutputChunk>,
    /// Retry index: 0 for the first attempt
    #[serde(default)]
    pub retry: u32,
}

impl TestResult {
    /// Create a result with no error and no captured output
    pub fn new(status: TestStatus, duration_ms: u64) -> Self {
        Self {
            status,
            duration_ms,
            error: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
            retry: 0,
        }
    }

    /// Set the retry index
    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    /// Attach an error message
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(TestError {
            message: Some(message.into()),
        });
        self
    }

    /// Append a chunk of standard output
    pub fn with_stdout(mut self, chunk: impl Into<OutputChunk>) -> Self {
        self.stdout.push(chunk.into());
        self
    }

    /// Append a chunk of standard error
    pub fn with_stderr(mut self, chunk: impl Into<OutputChunk>) -> Self {
        self.stderr.push(chunk.into());
        self
    }

    /// Error message as persisted: empty when absent
    pub fn error_message(&self) -> &str {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .unwrap_or("")
    }

    /// Standard output as persisted: chunks concatenated in order
    pub fn stdout_text(&self) -> String {
        join_chunks(&self.stdout)
    }

    /// Standard error as persisted: chunks concatenated in order
    pub fn stderr_text(&self) -> String {
        join_chunks(&self.stderr)
    }
}

fn join_chunks(chunks: &[OutputChunk]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        chunk.push_to(&mut out);
    }
    out
}

/// Aggregate result reported when the run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullResult {
    /// Aggregate outcome
    pub status: RunOutcome,
}

impl FullResult {
    /// Create a full result
    pub fn new(status: RunOutcome) -> Self {
        Self { status }
    }
}
