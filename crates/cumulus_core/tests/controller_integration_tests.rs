//! Integration tests for the lifecycle controller.

use std::sync::Arc;
use std::time::Duration;

use cumulus_client::{
    DescribeOutcome, FaultKind, MockProvisioner, ServiceFault, StackRequest, StackStatus,
};
use cumulus_core::{StackError, StackLifecycleController, WaitOptions};

fn fast_options() -> WaitOptions {
    WaitOptions::default().poll_interval(Duration::from_millis(1))
}

fn request() -> StackRequest {
    StackRequest::new("eu-west-1", "app", "Resources: {}")
}

fn controller_over(mock: &MockProvisioner) -> StackLifecycleController {
    StackLifecycleController::new(Arc::new(mock.clone()))
}

#[tokio::test]
async fn test_wait_succeeds_when_status_matches() {
    let mock = MockProvisioner::new().with_describe_outcomes(vec![
        DescribeOutcome::status(StackStatus::CreateInProgress),
        DescribeOutcome::status(StackStatus::CreateInProgress),
        DescribeOutcome::status(StackStatus::CreateComplete),
    ]);
    let controller = controller_over(&mock);

    controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::CreateComplete,
            &fast_options(),
        )
        .await
        .unwrap();

    assert_eq!(mock.call_count("describe_stack"), 3);
}

#[tokio::test]
async fn test_wait_fails_on_failure_terminal_status() {
    let mock = MockProvisioner::new().with_describe_outcomes(vec![
        DescribeOutcome::status(StackStatus::CreateInProgress),
        DescribeOutcome::status(StackStatus::CreateFailed),
    ]);
    let controller = controller_over(&mock);

    let err = controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::CreateComplete,
            &fast_options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StackError::OperationFailed {
            status: StackStatus::CreateFailed
        }
    ));
    assert_eq!(mock.call_count("describe_stack"), 2);
}

#[tokio::test]
async fn test_wait_failure_classification_ignores_expected_status() {
    // The failure-terminal set wins even when the caller waits for deletion.
    let mock = MockProvisioner::new()
        .push_describe(DescribeOutcome::status(StackStatus::RollbackComplete));
    let controller = controller_over(&mock);

    let err = controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::DeleteComplete,
            &fast_options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StackError::OperationFailed {
            status: StackStatus::RollbackComplete
        }
    ));
}

#[tokio::test]
async fn test_wait_expected_failure_status_exits_normally() {
    // Expected status is checked before failure classification, so a caller
    // may deliberately wait for ROLLBACK_COMPLETE.
    let mock = MockProvisioner::new()
        .push_describe(DescribeOutcome::status(StackStatus::RollbackComplete));
    let controller = controller_over(&mock);

    controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::RollbackComplete,
            &fast_options(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wait_deletion_confirmed_by_absence() {
    let mock = MockProvisioner::new().push_describe(DescribeOutcome::not_found("app"));
    let controller = controller_over(&mock);

    controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::DeleteComplete,
            &fast_options(),
        )
        .await
        .unwrap();

    assert_eq!(mock.call_count("describe_stack"), 1);
}

#[tokio::test]
async fn test_wait_unexpected_absence_is_not_found() {
    let mock = MockProvisioner::new().push_describe(DescribeOutcome::not_found("app"));
    let controller = controller_over(&mock);

    let err = controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::CreateComplete,
            &fast_options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StackError::NotFound { stack_name } if stack_name == "app"));
}

#[tokio::test]
async fn test_wait_propagates_other_describe_errors() {
    let mock = MockProvisioner::new().push_describe(DescribeOutcome::fault(
        FaultKind::Throttled,
        "Throttling",
        "Rate exceeded",
    ));
    let controller = controller_over(&mock);

    let err = controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::CreateComplete,
            &fast_options(),
        )
        .await
        .unwrap_err();

    match err {
        StackError::Client(client_err) => {
            assert_eq!(client_err.fault_kind(), Some(FaultKind::Throttled));
        }
        other => panic!("expected Client error, got: {other}"),
    }
    // Not retried.
    assert_eq!(mock.call_count("describe_stack"), 1);
}

#[tokio::test]
async fn test_wait_deadline_yields_cancelled() {
    let mock = MockProvisioner::new()
        .push_describe(DescribeOutcome::status(StackStatus::CreateInProgress));
    let controller = controller_over(&mock);

    let options = fast_options().deadline(Duration::ZERO);

    let err = controller
        .wait("eu-west-1", "app", StackStatus::CreateComplete, &options)
        .await
        .unwrap_err();

    assert!(matches!(err, StackError::Cancelled { stack_name, .. } if stack_name == "app"));
    assert_eq!(mock.call_count("describe_stack"), 1);
}

#[tokio::test]
async fn test_wait_keeps_polling_through_transitional_statuses() {
    let mock = MockProvisioner::new().with_describe_outcomes(vec![
        DescribeOutcome::status(StackStatus::UpdateInProgress),
        DescribeOutcome::status(StackStatus::UpdateCompleteCleanupInProgress),
        DescribeOutcome::status(StackStatus::UpdateComplete),
    ]);
    let controller = controller_over(&mock);

    controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::UpdateComplete,
            &fast_options(),
        )
        .await
        .unwrap();

    assert_eq!(mock.call_count("describe_stack"), 3);
}

#[tokio::test]
async fn test_create_returns_service_issued_id() {
    let mock = MockProvisioner::new();
    let controller = controller_over(&mock);

    let stack_id = controller.create(&request()).await.unwrap();

    assert!(stack_id.as_str().starts_with("stack/app/"));
    assert_eq!(mock.call_count("create_stack"), 1);
}

#[tokio::test]
async fn test_create_surfaces_rejection_unmodified() {
    let mock = MockProvisioner::new().fail_create(ServiceFault::new(
        FaultKind::AlreadyExists,
        "AlreadyExists",
        "Stack app already exists",
    ));
    let controller = controller_over(&mock);

    let err = controller.create(&request()).await.unwrap_err();

    match err {
        StackError::Client(client_err) => {
            assert_eq!(client_err.fault_kind(), Some(FaultKind::AlreadyExists));
        }
        other => panic!("expected Client error, got: {other}"),
    }
    // No automatic retry.
    assert_eq!(mock.call_count("create_stack"), 1);
}

#[tokio::test]
async fn test_update_noop_is_reported_and_still_raised() {
    let mock = MockProvisioner::new().fail_update(ServiceFault::new(
        FaultKind::NoUpdatesToPerform,
        "NoUpdatesToPerform",
        "No updates are to be performed.",
    ));
    let controller = controller_over(&mock);

    // The informational path logs, yet the underlying error must reach the
    // caller rather than being swallowed.
    let err = controller.update(&request()).await.unwrap_err();

    match err {
        StackError::Client(client_err) => {
            assert_eq!(
                client_err.fault_kind(),
                Some(FaultKind::NoUpdatesToPerform)
            );
        }
        other => panic!("expected Client error, got: {other}"),
    }
}

#[tokio::test]
async fn test_update_other_errors_surface_unmodified() {
    let mock = MockProvisioner::new().fail_update(ServiceFault::new(
        FaultKind::ValidationFailed,
        "ValidationError",
        "Template format error",
    ));
    let controller = controller_over(&mock);

    let err = controller.update(&request()).await.unwrap_err();

    match err {
        StackError::Client(client_err) => {
            assert_eq!(client_err.fault_kind(), Some(FaultKind::ValidationFailed));
        }
        other => panic!("expected Client error, got: {other}"),
    }
}

#[tokio::test]
async fn test_delete_then_wait_on_absence() {
    let mock = MockProvisioner::new().with_describe_outcomes(vec![
        DescribeOutcome::status(StackStatus::DeleteInProgress),
        DescribeOutcome::not_found("app"),
    ]);
    let controller = controller_over(&mock);

    controller.delete("eu-west-1", "app").await.unwrap();
    controller
        .wait(
            "eu-west-1",
            "app",
            StackStatus::DeleteComplete,
            &fast_options(),
        )
        .await
        .unwrap();

    assert_eq!(mock.call_count("delete_stack"), 1);
    assert_eq!(mock.call_count("describe_stack"), 2);
}

#[tokio::test]
async fn test_concurrent_waits_on_distinct_stacks() {
    // The controller is stateless across calls; two waits may run at once.
    let mock = MockProvisioner::new().with_describe_outcomes(vec![
        DescribeOutcome::status(StackStatus::CreateComplete),
        DescribeOutcome::status(StackStatus::CreateComplete),
    ]);
    let controller = Arc::new(controller_over(&mock));

    let a = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            controller
                .wait(
                    "eu-west-1",
                    "stack-a",
                    StackStatus::CreateComplete,
                    &fast_options(),
                )
                .await
        })
    };
    let b = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            controller
                .wait(
                    "eu-west-1",
                    "stack-b",
                    StackStatus::CreateComplete,
                    &fast_options(),
                )
                .await
        })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();
}
