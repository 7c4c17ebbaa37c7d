//! Error types for the client module.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Classified fault category for a service-reported error.
///
/// Mapping from the service's structured error code happens exactly once at
/// the transport boundary; nothing downstream re-parses message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The named stack does not exist in the target region.
    StackNotFound,
    /// The submitted template and parameters match the deployed state.
    NoUpdatesToPerform,
    /// A stack with the requested name already exists.
    AlreadyExists,
    /// The service rejected the template or parameters.
    ValidationFailed,
    /// The caller lacks permission for the requested operation.
    AccessDenied,
    /// The service is rate-limiting the caller.
    Throttled,
    /// Any other service-reported error.
    Other,
}

/// A structured error reported by the provisioning service.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct ServiceFault {
    pub kind: FaultKind,
    /// Service error code, verbatim.
    pub code: String,
    /// Human-readable message, verbatim. Informational only.
    pub message: String,
}

impl ServiceFault {
    pub fn new(kind: FaultKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Service error: {0}")]
    Service(#[from] ServiceFault),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Fault kind, when this is a classified service error.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            ClientError::Service(fault) => Some(fault.kind),
            _ => None,
        }
    }
}
