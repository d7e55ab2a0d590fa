//! Run synchronization engine
//!
//! Translates the harness lifecycle (run-begin, test-begin, test-end, run-end)
//! into mutations against any [`RunStore`](runledger_core::RunStore).
//!
//! ## Components
//!
//! - [`Reporter`]: the four hooks a harness invokes
//! - [`RunSynchronizer`]: the `Reporter` that owns the run identifier
//! - [`replay`]: drives a `Reporter` from serialized [`LifecycleEvent`]s
//!
//! [`LifecycleEvent`]: runledger_core::LifecycleEvent

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod replay;
pub mod reporter;
pub mod synchronizer;

pub use replay::{dispatch, replay};
pub use reporter::Reporter;
pub use synchronizer::{RunSynchronizer, SyncOptions, SyncPhase};
