//! Error types for lifecycle operations.

use std::time::Duration;

use cumulus_client::{ClientError, StackStatus};
use thiserror::Error;

/// Result type alias for lifecycle operations.
pub type StackResult<T> = Result<T, StackError>;

/// Errors that can occur during stack lifecycle operations.
#[derive(Error, Debug)]
pub enum StackError {
    /// Polling observed a failure-terminal status. Fatal to the wait; the
    /// controller never retries the operation.
    #[error("Stack operation failed with status: {status}")]
    OperationFailed { status: StackStatus },

    /// The stack disappeared while a non-deletion terminal state was expected.
    #[error("Stack {stack_name} does not exist")]
    NotFound { stack_name: String },

    /// The wait deadline elapsed before a terminal condition was observed.
    /// Distinct from service-reported failure statuses.
    #[error("Wait for stack {stack_name} cancelled after {waited:?}")]
    Cancelled {
        stack_name: String,
        waited: Duration,
    },

    /// A create/update/describe/delete call was rejected by the service or
    /// failed in transport; surfaced unmodified.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}
