//! Error types for index provisioning.

use thiserror::Error;

/// Result type alias for search index operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Classified fault category for a search-service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexFaultKind {
    /// The index already exists. Not an error for create-if-absent.
    AlreadyExists,
    /// The request was rejected for any other reason.
    Other,
}

/// A structured error reported by the search service.
#[derive(Debug, Clone, Error)]
#[error("{error_type}: {reason}")]
pub struct IndexFault {
    pub kind: IndexFaultKind,
    /// Service error type, verbatim.
    pub error_type: String,
    /// Human-readable reason, verbatim. Informational only.
    pub reason: String,
}

/// Errors that can occur during index operations.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Index error: {0}")]
    Index(#[from] IndexFault),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
