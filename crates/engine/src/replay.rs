//! Drive a [`Reporter`] from serialized lifecycle events

use crate::reporter::Reporter;
use runledger_core::{LedgerResult, LifecycleEvent};
use tracing::debug;

/// Invoke the hook matching `event`
pub async fn dispatch<R>(reporter: &R, event: &LifecycleEvent) -> LedgerResult<()>
where
    R: Reporter + ?Sized,
{
    debug!(event = event.name(), "Dispatching lifecycle event");
    match event {
        LifecycleEvent::RunBegin => reporter.on_begin().await,
        LifecycleEvent::TestBegin { test } => reporter.on_test_begin(test).await,
        LifecycleEvent::TestEnd { test, result } => reporter.on_test_end(test, result).await,
        LifecycleEvent::RunEnd { result } => reporter.on_end(result).await,
    }
}

/// Dispatch events in order, stopping at the first error
///
/// Returns the number of events applied.
pub async fn replay<R, I>(reporter: &R, events: I) -> LedgerResult<usize>
where
    R: Reporter + ?Sized,
    I: IntoIterator<Item = LifecycleEvent>,
{
    let mut applied = 0;
    for event in events {
        dispatch(reporter, &event).await?;
        applied += 1;
    }
    Ok(applied)
}
