//! Replay Tests
//!
//! JSON-lines lifecycle events drive a recorder exactly like direct hook calls.

use crate::*;

const EVENTS: &str = r#"
{"event":"run_begin"}
{"event":"test_begin","test":{"id":"h1","title":"A"}}
{"event":"test_begin","test":{"id":"h2","title":"B"}}
{"event":"test_end","test":{"id":"h2","title":"B"},"result":{"status":"timedOut","duration":30000,"error":{"message":"Test timeout of 30000ms exceeded."}}}
{"event":"test_end","test":{"id":"h1","title":"A"},"result":{"status":"passed","duration":12,"stdout":["ok\n"]}}
{"event":"run_end","result":{"status":"failed"}}
"#;

fn parse(raw: &str) -> Vec<LifecycleEvent> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// Test a full script replays into the ledger
#[tokio::test]
async fn test_replay_script() {
    let recorder = ephemeral().await;
    let applied = runledger::replay(&recorder, parse(EVENTS)).await.unwrap();
    assert_eq!(applied, 6);

    let store = sqlite(&recorder);
    let run_id = recorder.synchronizer().run_id().unwrap();
    assert_eq!(
        store.run(run_id).await.unwrap().unwrap().status,
        RunStatus::Failed
    );

    let rows = store.tests_for_run(run_id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].history_id, "h1");
    assert_eq!(rows[0].stdout.as_deref(), Some("ok\n"));
    assert_eq!(rows[1].status, Some(TestStatus::TimedOut));
    assert_eq!(
        rows[1].error.as_deref(),
        Some("Test timeout of 30000ms exceeded.")
    );
}

/// Test events after run_end stop the replay
#[tokio::test]
async fn test_replay_rejects_events_after_end() {
    let recorder = ephemeral().await;
    let mut events = parse(EVENTS);
    events.push(LifecycleEvent::TestBegin {
        test: TestCase::new("late", "late"),
    });

    let err = runledger::replay(&recorder, events).await.unwrap_err();
    assert!(err.is_fatal());
}
