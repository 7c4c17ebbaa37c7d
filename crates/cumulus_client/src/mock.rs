//! Mock provisioner for testing.
//!
//! Provides a scripted implementation of the Provisioner trait for use in
//! unit tests without a reachable provisioning service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult, FaultKind, ServiceFault};
use crate::provisioner::Provisioner;
use crate::types::{StackDescription, StackId, StackRequest, StackStatus};

/// Scripted result of one describe call.
#[derive(Debug, Clone)]
pub enum DescribeOutcome {
    /// The service reports the stack in the given status.
    Observed(StackStatus),
    /// The describe call itself fails with a classified fault.
    Fault(ServiceFault),
}

impl DescribeOutcome {
    pub fn status(status: StackStatus) -> Self {
        DescribeOutcome::Observed(status)
    }

    /// The "stack does not exist" fault as the service reports it.
    pub fn not_found(stack_name: &str) -> Self {
        DescribeOutcome::Fault(ServiceFault::new(
            FaultKind::StackNotFound,
            "StackNotFound",
            format!("Stack with name {stack_name} does not exist"),
        ))
    }

    pub fn fault(kind: FaultKind, code: &str, message: &str) -> Self {
        DescribeOutcome::Fault(ServiceFault::new(kind, code, message))
    }
}

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub method: String,
    pub region: String,
    pub stack_name: String,
}

/// Mock provisioner for testing.
///
/// Returns predefined outcomes and captures all calls, allowing tests to
/// verify polling behavior without a running service. Describe outcomes are
/// consumed in order; once the script is exhausted the last outcome repeats,
/// matching a stack that has settled into a terminal state.
#[derive(Clone)]
pub struct MockProvisioner {
    describe_outcomes: Arc<RwLock<Vec<DescribeOutcome>>>,
    describe_index: Arc<AtomicUsize>,
    create_fault: Arc<RwLock<Option<ServiceFault>>>,
    update_fault: Arc<RwLock<Option<ServiceFault>>>,
    delete_fault: Arc<RwLock<Option<ServiceFault>>>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
}

impl Default for MockProvisioner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvisioner {
    /// Create a new mock with an empty script.
    pub fn new() -> Self {
        Self {
            describe_outcomes: Arc::new(RwLock::new(Vec::new())),
            describe_index: Arc::new(AtomicUsize::new(0)),
            create_fault: Arc::new(RwLock::new(None)),
            update_fault: Arc::new(RwLock::new(None)),
            delete_fault: Arc::new(RwLock::new(None)),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Script the sequence of describe outcomes.
    pub fn with_describe_outcomes(self, outcomes: Vec<DescribeOutcome>) -> Self {
        *self.describe_outcomes.write() = outcomes;
        self
    }

    /// Append one describe outcome to the script.
    pub fn push_describe(self, outcome: DescribeOutcome) -> Self {
        self.describe_outcomes.write().push(outcome);
        self
    }

    /// Make the next create call fail with the given fault.
    pub fn fail_create(self, fault: ServiceFault) -> Self {
        *self.create_fault.write() = Some(fault);
        self
    }

    /// Make the next update call fail with the given fault.
    pub fn fail_update(self, fault: ServiceFault) -> Self {
        *self.update_fault.write() = Some(fault);
        self
    }

    /// Make the next delete call fail with the given fault.
    pub fn fail_delete(self, fault: ServiceFault) -> Self {
        *self.delete_fault.write() = Some(fault);
        self
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Number of calls made to a specific method.
    pub fn call_count(&self, method: &str) -> usize {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, region: &str, stack_name: &str) {
        self.captured_calls.write().push(CapturedCall {
            method: method.to_string(),
            region: region.to_string(),
            stack_name: stack_name.to_string(),
        });
    }

    fn next_describe_outcome(&self) -> Option<DescribeOutcome> {
        let outcomes = self.describe_outcomes.read();
        if outcomes.is_empty() {
            return None;
        }
        let index = self.describe_index.fetch_add(1, Ordering::SeqCst);
        outcomes.get(index.min(outcomes.len() - 1)).cloned()
    }

    fn mock_stack_id(stack_name: &str) -> StackId {
        StackId(format!("stack/{stack_name}/{}", Uuid::new_v4()))
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn create_stack(&self, request: &StackRequest) -> ClientResult<StackId> {
        self.record_call("create_stack", &request.region, &request.stack_name);
        if let Some(fault) = self.create_fault.read().clone() {
            return Err(ClientError::Service(fault));
        }
        Ok(Self::mock_stack_id(&request.stack_name))
    }

    async fn update_stack(&self, request: &StackRequest) -> ClientResult<StackId> {
        self.record_call("update_stack", &request.region, &request.stack_name);
        if let Some(fault) = self.update_fault.read().clone() {
            return Err(ClientError::Service(fault));
        }
        Ok(Self::mock_stack_id(&request.stack_name))
    }

    async fn describe_stack(
        &self,
        region: &str,
        stack_name: &str,
    ) -> ClientResult<StackDescription> {
        self.record_call("describe_stack", region, stack_name);

        match self.next_describe_outcome() {
            Some(DescribeOutcome::Observed(status)) => Ok(StackDescription {
                stack_id: Self::mock_stack_id(stack_name),
                stack_name: stack_name.to_string(),
                status,
                status_reason: None,
                last_updated: Some(chrono::Utc::now()),
            }),
            Some(DescribeOutcome::Fault(fault)) => Err(ClientError::Service(fault)),
            None => Err(ClientError::Service(ServiceFault::new(
                FaultKind::Other,
                "MockScriptExhausted",
                "no describe outcome scripted",
            ))),
        }
    }

    async fn delete_stack(&self, region: &str, stack_name: &str) -> ClientResult<()> {
        self.record_call("delete_stack", region, stack_name);
        if let Some(fault) = self.delete_fault.read().clone() {
            return Err(ClientError::Service(fault));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> StackRequest {
        StackRequest::new("eu-west-1", "app", "Resources: {}")
    }

    #[tokio::test]
    async fn test_mock_create_returns_id() {
        let mock = MockProvisioner::new();
        let id = mock.create_stack(&request()).await.unwrap();
        assert!(id.as_str().starts_with("stack/app/"));
    }

    #[tokio::test]
    async fn test_mock_scripted_describe_sequence() {
        let mock = MockProvisioner::new().with_describe_outcomes(vec![
            DescribeOutcome::status(StackStatus::CreateInProgress),
            DescribeOutcome::status(StackStatus::CreateComplete),
        ]);

        let first = mock.describe_stack("eu-west-1", "app").await.unwrap();
        assert_eq!(first.status, StackStatus::CreateInProgress);

        let second = mock.describe_stack("eu-west-1", "app").await.unwrap();
        assert_eq!(second.status, StackStatus::CreateComplete);

        // Script exhausted: the last outcome repeats.
        let third = mock.describe_stack("eu-west-1", "app").await.unwrap();
        assert_eq!(third.status, StackStatus::CreateComplete);
    }

    #[tokio::test]
    async fn test_mock_describe_fault() {
        let mock = MockProvisioner::new().push_describe(DescribeOutcome::not_found("app"));

        let err = mock.describe_stack("eu-west-1", "app").await.unwrap_err();
        assert_eq!(err.fault_kind(), Some(FaultKind::StackNotFound));
    }

    #[tokio::test]
    async fn test_mock_captures_calls() {
        let mock = MockProvisioner::new()
            .push_describe(DescribeOutcome::status(StackStatus::CreateComplete));

        let _ = mock.create_stack(&request()).await;
        let _ = mock.describe_stack("eu-west-1", "app").await;

        assert_eq!(mock.call_count("create_stack"), 1);
        assert_eq!(mock.call_count("describe_stack"), 1);

        let calls = mock.get_calls();
        assert_eq!(calls[0].method, "create_stack");
        assert_eq!(calls[1].stack_name, "app");
    }

    #[tokio::test]
    async fn test_mock_create_fault() {
        let mock = MockProvisioner::new().fail_create(ServiceFault::new(
            FaultKind::AlreadyExists,
            "AlreadyExists",
            "Stack app already exists",
        ));

        let err = mock.create_stack(&request()).await.unwrap_err();
        assert_eq!(err.fault_kind(), Some(FaultKind::AlreadyExists));
    }

    #[tokio::test]
    async fn test_mock_unscripted_describe_fails() {
        let mock = MockProvisioner::new();
        let err = mock.describe_stack("eu-west-1", "app").await.unwrap_err();
        assert_eq!(err.fault_kind(), Some(FaultKind::Other));
    }
}
