//! Serializable lifecycle events
//!
//! A harness that cannot call the reporter hooks in-process can emit these as
//! JSON lines instead:
//!
//! ```json
//! {"event":"run_begin"}
//! {"event":"test_begin","test":{"id":"h1","title":"A"}}
//! {"event":"test_end","test":{"id":"h1","title":"A"},"result":{"status":"passed","duration":12}}
//! {"event":"run_end","result":{"status":"passed"}}
//! ```

use crate::harness::{FullResult, TestCase, TestResult};
use serde::{Deserialize, Serialize};

/// One of the four harness lifecycle callbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The run started
    RunBegin,
    /// A test started
    TestBegin {
        /// The test
        test: TestCase,
    },
    /// A test finished
    TestEnd {
        /// The test
        test: TestCase,
        /// Its outcome
        result: TestResult,
    },
    /// The run finished
    RunEnd {
        /// Aggregate outcome
        result: FullResult,
    },
}

impl LifecycleEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::RunBegin => "run_begin",
            LifecycleEvent::TestBegin { .. } => "test_begin",
            LifecycleEvent::TestEnd { .. } => "test_end",
            LifecycleEvent::RunEnd { .. } => "run_end",
        }
    }
}
