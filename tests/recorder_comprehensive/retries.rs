//! Retry Tests
//!
//! A retried test reuses its history id. The ledger keeps exactly one row per
//! history id per run and each test-end overwrites it, so the row reflects the
//! latest attempt. This is a single-row contract, not a retry history log.

use crate::*;

/// Test fail-then-pass leaves one row showing the passing retry
#[tokio::test]
async fn test_retry_overwrites_single_row() {
    let recorder = ephemeral().await;
    let test = TestCase::new("h1", "flaky");

    recorder.on_begin().await.unwrap();
    recorder.on_test_begin(&test).await.unwrap();
    recorder
        .on_test_end(&test, &result(TestStatus::Failed, 30, 0).with_error("timeout"))
        .await
        .unwrap();
    recorder.on_test_begin(&test).await.unwrap();
    recorder
        .on_test_end(&test, &result(TestStatus::Passed, 25, 1))
        .await
        .unwrap();
    recorder
        .on_end(&FullResult::new(RunOutcome::Passed))
        .await
        .unwrap();

    let run_id = recorder.synchronizer().run_id().unwrap();
    let rows = sqlite(&recorder).tests_for_run(run_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, Some(TestStatus::Passed));
    assert_eq!(rows[0].retry, Some(1));
    assert_eq!(rows[0].duration_ms, Some(25));
    // The earlier attempt's error does not linger.
    assert_eq!(rows[0].error.as_deref(), Some(""));
}

/// Test re-registration does not reset the recorded outcome
#[tokio::test]
async fn test_begin_of_retry_keeps_previous_outcome_until_end() {
    let recorder = ephemeral().await;
    let test = TestCase::new("h1", "flaky");

    recorder.on_begin().await.unwrap();
    recorder.on_test_begin(&test).await.unwrap();
    recorder
        .on_test_end(&test, &result(TestStatus::Failed, 30, 0))
        .await
        .unwrap();
    recorder.on_test_begin(&test).await.unwrap();

    let run_id = recorder.synchronizer().run_id().unwrap();
    let rows = sqlite(&recorder).tests_for_run(run_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, Some(TestStatus::Failed));
    assert_eq!(rows[0].retry, Some(0));
}

/// Test many retries still produce a single row
#[tokio::test]
async fn test_many_retries_single_row() {
    let recorder = ephemeral().await;
    let test = TestCase::new("h1", "very flaky");

    recorder.on_begin().await.unwrap();
    for retry in 0..5 {
        recorder.on_test_begin(&test).await.unwrap();
        let status = if retry < 4 {
            TestStatus::Failed
        } else {
            TestStatus::Passed
        };
        recorder
            .on_test_end(&test, &result(status, 10, retry))
            .await
            .unwrap();
    }

    let run_id = recorder.synchronizer().run_id().unwrap();
    let rows = sqlite(&recorder).tests_for_run(run_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].retry, Some(4));
    assert_eq!(rows[0].status, Some(TestStatus::Passed));
}
