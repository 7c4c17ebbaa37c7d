//! Wire model for the provisioning service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service-assigned stack identifier.
///
/// Opaque to callers; the service mints it on create/update and it is only
/// ever echoed back in logs and describe output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackId(pub String);

impl StackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single template parameter.
///
/// Serializes with the service's two-field record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "ParameterKey")]
    pub key: String,
    #[serde(rename = "ParameterValue")]
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Capability acknowledgement flags for elevated-privilege operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "CAPABILITY_IAM")]
    Iam,
    #[serde(rename = "CAPABILITY_NAMED_IAM")]
    NamedIam,
    #[serde(rename = "CAPABILITY_AUTO_EXPAND")]
    AutoExpand,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Iam => "CAPABILITY_IAM",
            Capability::NamedIam => "CAPABILITY_NAMED_IAM",
            Capability::AutoExpand => "CAPABILITY_AUTO_EXPAND",
        }
    }

    /// Default acknowledgement set for stack operations.
    pub fn default_set() -> Vec<Capability> {
        vec![Capability::NamedIam]
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stack status as reported by the service at a point in time.
///
/// Closed enumeration; the service will not report values outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackStatus {
    CreateInProgress,
    CreateComplete,
    CreateFailed,
    UpdateInProgress,
    UpdateCompleteCleanupInProgress,
    UpdateComplete,
    UpdateRollbackInProgress,
    UpdateRollbackComplete,
    RollbackInProgress,
    RollbackComplete,
    DeleteInProgress,
    DeleteComplete,
    DeleteFailed,
    ReviewInProgress,
}

impl StackStatus {
    /// Statuses after which the requested operation cannot succeed.
    ///
    /// Everything else is either the caller's expected terminal status or a
    /// transitional state worth another poll.
    pub fn is_failure_terminal(&self) -> bool {
        matches!(
            self,
            StackStatus::CreateFailed | StackStatus::RollbackComplete | StackStatus::DeleteFailed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StackStatus::CreateInProgress => "CREATE_IN_PROGRESS",
            StackStatus::CreateComplete => "CREATE_COMPLETE",
            StackStatus::CreateFailed => "CREATE_FAILED",
            StackStatus::UpdateInProgress => "UPDATE_IN_PROGRESS",
            StackStatus::UpdateCompleteCleanupInProgress => "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
            StackStatus::UpdateComplete => "UPDATE_COMPLETE",
            StackStatus::UpdateRollbackInProgress => "UPDATE_ROLLBACK_IN_PROGRESS",
            StackStatus::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            StackStatus::RollbackInProgress => "ROLLBACK_IN_PROGRESS",
            StackStatus::RollbackComplete => "ROLLBACK_COMPLETE",
            StackStatus::DeleteInProgress => "DELETE_IN_PROGRESS",
            StackStatus::DeleteComplete => "DELETE_COMPLETE",
            StackStatus::DeleteFailed => "DELETE_FAILED",
            StackStatus::ReviewInProgress => "REVIEW_IN_PROGRESS",
        }
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE_IN_PROGRESS" => Ok(StackStatus::CreateInProgress),
            "CREATE_COMPLETE" => Ok(StackStatus::CreateComplete),
            "CREATE_FAILED" => Ok(StackStatus::CreateFailed),
            "UPDATE_IN_PROGRESS" => Ok(StackStatus::UpdateInProgress),
            "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS" => {
                Ok(StackStatus::UpdateCompleteCleanupInProgress)
            }
            "UPDATE_COMPLETE" => Ok(StackStatus::UpdateComplete),
            "UPDATE_ROLLBACK_IN_PROGRESS" => Ok(StackStatus::UpdateRollbackInProgress),
            "UPDATE_ROLLBACK_COMPLETE" => Ok(StackStatus::UpdateRollbackComplete),
            "ROLLBACK_IN_PROGRESS" => Ok(StackStatus::RollbackInProgress),
            "ROLLBACK_COMPLETE" => Ok(StackStatus::RollbackComplete),
            "DELETE_IN_PROGRESS" => Ok(StackStatus::DeleteInProgress),
            "DELETE_COMPLETE" => Ok(StackStatus::DeleteComplete),
            "DELETE_FAILED" => Ok(StackStatus::DeleteFailed),
            "REVIEW_IN_PROGRESS" => Ok(StackStatus::ReviewInProgress),
            other => Err(format!("unknown stack status: {other}")),
        }
    }
}

/// Immutable input to a create or update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackRequest {
    /// Target deployment region.
    pub region: String,
    /// Unique stack name within the region.
    pub stack_name: String,
    /// Opaque template payload; never parsed on this side of the wire.
    pub template_body: String,
    /// Ordered parameter list; keys unique.
    pub parameters: Vec<Parameter>,
    /// Acknowledgement flags required for elevated-privilege resources.
    pub capabilities: Vec<Capability>,
}

impl StackRequest {
    pub fn new(
        region: impl Into<String>,
        stack_name: impl Into<String>,
        template_body: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            stack_name: stack_name.into(),
            template_body: template_body.into(),
            parameters: Vec::new(),
            capabilities: Capability::default_set(),
        }
    }

    pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(key, value));
        self
    }

    pub fn capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// One describe-poll observation of a stack.
///
/// Never cached; every poll re-queries the service and the remote state is
/// authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackDescription {
    pub stack_id: StackId,
    pub stack_name: String,
    pub status: StackStatus,
    pub status_reason: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_wire_shape() {
        let param = Parameter::new("InstanceType", "t3.micro");
        let json = serde_json::to_value(&param).unwrap();

        assert_eq!(json["ParameterKey"], "InstanceType");
        assert_eq!(json["ParameterValue"], "t3.micro");
    }

    #[test]
    fn test_status_wire_spelling() {
        let json = serde_json::to_value(StackStatus::CreateInProgress).unwrap();
        assert_eq!(json, "CREATE_IN_PROGRESS");

        let status: StackStatus = serde_json::from_value(json).unwrap();
        assert_eq!(status, StackStatus::CreateInProgress);
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            StackStatus::CreateComplete,
            StackStatus::UpdateRollbackComplete,
            StackStatus::DeleteFailed,
            StackStatus::ReviewInProgress,
        ] {
            assert_eq!(status.as_str().parse::<StackStatus>().unwrap(), status);
        }

        assert!("NOT_A_STATUS".parse::<StackStatus>().is_err());
    }

    #[test]
    fn test_failure_terminal_set() {
        assert!(StackStatus::CreateFailed.is_failure_terminal());
        assert!(StackStatus::RollbackComplete.is_failure_terminal());
        assert!(StackStatus::DeleteFailed.is_failure_terminal());

        assert!(!StackStatus::CreateComplete.is_failure_terminal());
        assert!(!StackStatus::UpdateRollbackComplete.is_failure_terminal());
        assert!(!StackStatus::DeleteInProgress.is_failure_terminal());
    }

    #[test]
    fn test_default_capabilities() {
        let request = StackRequest::new("eu-west-1", "app-stack", "Resources: {}");
        assert_eq!(request.capabilities, vec![Capability::NamedIam]);
        assert_eq!(Capability::NamedIam.as_str(), "CAPABILITY_NAMED_IAM");
    }
}
