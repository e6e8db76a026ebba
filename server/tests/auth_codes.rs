//! Verification code issue/verify behavior.

mod common;

use common::{RecordingNotifier, test_state};

const CUSTOMER_ID: i64 = 424_242;

#[tokio::test]
async fn test_issue_then_verify_marks_identity_verified() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;

    state
        .verification
        .issue(CUSTOMER_ID, "123456".into())
        .await
        .unwrap();
    let verified = state
        .verification
        .verify(CUSTOMER_ID, "123456")
        .await
        .unwrap();
    assert!(verified.verified);
}

#[tokio::test]
async fn test_wrong_code_rejected() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;

    state
        .verification
        .issue(CUSTOMER_ID, "123456".into())
        .await
        .unwrap();
    assert!(state.verification.verify(CUSTOMER_ID, "654321").await.is_err());
}

#[tokio::test]
async fn test_reissue_replaces_outstanding_code() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;

    state
        .verification
        .issue(CUSTOMER_ID, "111111".into())
        .await
        .unwrap();
    state
        .verification
        .issue(CUSTOMER_ID, "222222".into())
        .await
        .unwrap();

    // Only the latest code is valid
    assert!(state.verification.verify(CUSTOMER_ID, "111111").await.is_err());
    assert!(state.verification.verify(CUSTOMER_ID, "222222").await.is_ok());
}

#[tokio::test]
async fn test_verify_without_issue_is_not_found() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;
    assert!(state.verification.verify(999, "123456").await.is_err());
}
