//! Stack lifecycle controller and polling state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use cumulus_client::{ClientError, FaultKind, Provisioner, StackId, StackRequest, StackStatus};

use crate::error::{StackError, StackResult};

/// Inter-poll delay used when no override is given.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Options for a single wait call.
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Fixed delay between consecutive polls.
    pub poll_interval: Duration,
    /// Total wait budget. `None` polls until a terminal condition fires,
    /// matching the documented unbounded contract.
    pub deadline: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }
}

impl WaitOptions {
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Drives create/update/delete requests and waits for terminal states.
///
/// Stateless across calls: every poll re-queries the service and nothing is
/// cached, so one controller may serve concurrent waits on distinct stacks.
pub struct StackLifecycleController {
    provisioner: Arc<dyn Provisioner>,
}

impl StackLifecycleController {
    /// Create a controller over the given service boundary.
    pub fn new(provisioner: Arc<dyn Provisioner>) -> Self {
        Self { provisioner }
    }

    /// Submit a create request.
    ///
    /// Service rejections surface unmodified; no retry is attempted here.
    pub async fn create(&self, request: &StackRequest) -> StackResult<StackId> {
        info!(
            "Creating stack: {} in region: {}...",
            request.stack_name, request.region
        );

        match self.provisioner.create_stack(request).await {
            Ok(stack_id) => {
                info!("Stack creation initiated. Stack ID: {stack_id}");
                Ok(stack_id)
            }
            Err(e) => {
                error!("An error occurred while creating the stack: {e}");
                Err(e.into())
            }
        }
    }

    /// Submit an update request.
    ///
    /// A "no updates to perform" rejection is reported as informational but
    /// still returned to the caller; callers that want to treat it as success
    /// match on [`FaultKind::NoUpdatesToPerform`].
    pub async fn update(&self, request: &StackRequest) -> StackResult<StackId> {
        info!(
            "Updating stack: {} in region: {}...",
            request.stack_name, request.region
        );

        match self.provisioner.update_stack(request).await {
            Ok(stack_id) => {
                info!("Stack update initiated. Stack ID: {stack_id}");
                Ok(stack_id)
            }
            Err(e) => {
                if e.fault_kind() == Some(FaultKind::NoUpdatesToPerform) {
                    info!(
                        "No changes detected. Stack {} is already up to date.",
                        request.stack_name
                    );
                } else {
                    error!("An error occurred during stack update: {e}");
                }
                Err(e.into())
            }
        }
    }

    /// Submit a delete request.
    pub async fn delete(&self, region: &str, stack_name: &str) -> StackResult<()> {
        info!("Deleting stack: {stack_name} in region: {region}...");

        match self.provisioner.delete_stack(region, stack_name).await {
            Ok(()) => {
                info!("Stack deletion initiated for {stack_name}.");
                Ok(())
            }
            Err(e) => {
                error!("An error occurred while deleting the stack: {e}");
                Err(e.into())
            }
        }
    }

    /// Poll until the stack reaches `expected` or a failure condition fires.
    ///
    /// Polls are strictly sequential with a fixed inter-poll delay. The
    /// remote state is authoritative: consecutive polls may disagree and no
    /// status is ever cached. Terminal outcomes:
    ///
    /// - observed status equals `expected`: success;
    /// - observed status is failure-terminal:
    ///   [`StackError::OperationFailed`], regardless of `expected`;
    /// - describe reports the stack missing while `expected` is
    ///   `DELETE_COMPLETE`: success, the disappearance proves deletion;
    /// - describe reports the stack missing otherwise:
    ///   [`StackError::NotFound`];
    /// - any other describe error propagates unmodified, not retried;
    /// - the optional deadline elapses: [`StackError::Cancelled`], never
    ///   conflated with a service-reported failure.
    pub async fn wait(
        &self,
        region: &str,
        stack_name: &str,
        expected: StackStatus,
        options: &WaitOptions,
    ) -> StackResult<()> {
        info!("Waiting for stack {stack_name} to reach status: {expected} in region: {region}...");
        let started = Instant::now();

        loop {
            match self.provisioner.describe_stack(region, stack_name).await {
                Ok(description) => {
                    info!("Current stack status: {}. Waiting...", description.status);

                    if description.status == expected {
                        info!("Stack {stack_name} reached expected status: {expected}.");
                        return Ok(());
                    }
                    if description.status.is_failure_terminal() {
                        error!(
                            "Stack operation failed with status: {}",
                            description.status
                        );
                        return Err(StackError::OperationFailed {
                            status: description.status,
                        });
                    }
                }
                Err(ClientError::Service(fault)) if fault.kind == FaultKind::StackNotFound => {
                    if expected == StackStatus::DeleteComplete {
                        info!("Stack {stack_name} deleted successfully.");
                        return Ok(());
                    }
                    warn!("Stack {stack_name} does not exist.");
                    return Err(StackError::NotFound {
                        stack_name: stack_name.to_string(),
                    });
                }
                Err(e) => {
                    error!("Describe call failed for stack {stack_name}: {e}");
                    return Err(e.into());
                }
            }

            if let Some(limit) = options.deadline {
                let waited = started.elapsed();
                if waited >= limit {
                    warn!("Wait for stack {stack_name} cancelled after {waited:?}.");
                    return Err(StackError::Cancelled {
                        stack_name: stack_name.to_string(),
                        waited,
                    });
                }
            }

            tokio::time::sleep(options.poll_interval).await;
        }
    }
}
