//! Provisioner trait.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{StackDescription, StackId, StackRequest};

/// Boundary to the remote provisioning service.
///
/// Implementations are stateless between calls; no session or transaction
/// semantics exist, so a single instance may be shared freely across tasks.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Submit a stack create request.
    async fn create_stack(&self, request: &StackRequest) -> ClientResult<StackId>;

    /// Submit a stack update request.
    async fn update_stack(&self, request: &StackRequest) -> ClientResult<StackId>;

    /// Fetch the current state of a named stack.
    async fn describe_stack(&self, region: &str, stack_name: &str)
        -> ClientResult<StackDescription>;

    /// Submit a stack delete request.
    async fn delete_stack(&self, region: &str, stack_name: &str) -> ClientResult<()>;
}
