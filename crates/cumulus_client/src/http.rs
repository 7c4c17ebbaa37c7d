//! HTTP-backed provisioner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::ProvisionerConfig;
use crate::error::{ClientError, ClientResult, FaultKind, ServiceFault};
use crate::provisioner::Provisioner;
use crate::types::{Capability, Parameter, StackDescription, StackId, StackRequest, StackStatus};

/// Map a service error code to its fault kind.
///
/// This is the only place wire error codes are interpreted; downstream logic
/// matches on [`FaultKind`] and never inspects code or message text.
pub fn classify_code(code: &str) -> FaultKind {
    match code {
        "StackNotFound" | "ResourceNotFound" => FaultKind::StackNotFound,
        "NoUpdatesToPerform" => FaultKind::NoUpdatesToPerform,
        "AlreadyExists" => FaultKind::AlreadyExists,
        "ValidationError" => FaultKind::ValidationFailed,
        "AccessDenied" => FaultKind::AccessDenied,
        "Throttling" => FaultKind::Throttled,
        _ => FaultKind::Other,
    }
}

/// Structured error envelope returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct MutateStackBody<'a> {
    #[serde(rename = "StackName")]
    stack_name: &'a str,
    #[serde(rename = "TemplateBody")]
    template_body: &'a str,
    #[serde(rename = "Parameters")]
    parameters: &'a [Parameter],
    #[serde(rename = "Capabilities")]
    capabilities: &'a [Capability],
    #[serde(rename = "ClientRequestToken")]
    client_request_token: String,
}

#[derive(Debug, Deserialize)]
struct MutateStackResponse {
    #[serde(rename = "StackId")]
    stack_id: StackId,
}

#[derive(Debug, Deserialize)]
struct DescribeStackResponse {
    #[serde(rename = "StackId")]
    stack_id: StackId,
    #[serde(rename = "StackName")]
    stack_name: String,
    #[serde(rename = "StackStatus")]
    status: StackStatus,
    #[serde(rename = "StatusReason")]
    status_reason: Option<String>,
    #[serde(rename = "LastUpdated")]
    last_updated: Option<DateTime<Utc>>,
}

/// Provisioner talking JSON over HTTP to the service endpoint.
pub struct HttpProvisioner {
    config: ProvisionerConfig,
    client: reqwest::Client,
}

impl HttpProvisioner {
    /// Create a provisioner from the given configuration.
    pub fn new(config: ProvisionerConfig) -> ClientResult<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidEndpoint(
                "base URL must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }

    fn stack_url(&self, region: &str, stack_name: &str) -> String {
        format!(
            "{}/regions/{}/stacks/{}",
            self.config.base_url.trim_end_matches('/'),
            region,
            stack_name
        )
    }

    fn stacks_url(&self, region: &str) -> String {
        format!(
            "{}/regions/{}/stacks",
            self.config.base_url.trim_end_matches('/'),
            region
        )
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Turn a non-2xx response into a classified service fault.
    async fn fault_from_response(response: reqwest::Response) -> ClientError {
        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => ClientError::Service(ServiceFault::new(
                classify_code(&envelope.code),
                envelope.code,
                envelope.message,
            )),
            Err(_) => ClientError::Service(ServiceFault::new(
                FaultKind::Other,
                status.as_str().to_string(),
                format!("service returned HTTP {status} with an unreadable body"),
            )),
        }
    }

    async fn send_mutation(
        &self,
        builder: reqwest::RequestBuilder,
        request: &StackRequest,
    ) -> ClientResult<StackId> {
        let body = MutateStackBody {
            stack_name: &request.stack_name,
            template_body: &request.template_body,
            parameters: &request.parameters,
            capabilities: &request.capabilities,
            client_request_token: Uuid::new_v4().to_string(),
        };

        let response = self.apply_auth(builder).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(Self::fault_from_response(response).await);
        }

        let parsed: MutateStackResponse = response.json().await?;
        Ok(parsed.stack_id)
    }
}

#[async_trait]
impl Provisioner for HttpProvisioner {
    async fn create_stack(&self, request: &StackRequest) -> ClientResult<StackId> {
        let url = self.stacks_url(&request.region);
        debug!("POST {}", url);
        self.send_mutation(self.client.post(&url), request).await
    }

    async fn update_stack(&self, request: &StackRequest) -> ClientResult<StackId> {
        let url = self.stack_url(&request.region, &request.stack_name);
        debug!("PUT {}", url);
        self.send_mutation(self.client.put(&url), request).await
    }

    async fn describe_stack(
        &self,
        region: &str,
        stack_name: &str,
    ) -> ClientResult<StackDescription> {
        let url = self.stack_url(region, stack_name);
        debug!("GET {}", url);

        let response = self.apply_auth(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(Self::fault_from_response(response).await);
        }

        let parsed: DescribeStackResponse = response.json().await?;
        Ok(StackDescription {
            stack_id: parsed.stack_id,
            stack_name: parsed.stack_name,
            status: parsed.status,
            status_reason: parsed.status_reason,
            last_updated: parsed.last_updated,
        })
    }

    async fn delete_stack(&self, region: &str, stack_name: &str) -> ClientResult<()> {
        let url = self.stack_url(region, stack_name);
        debug!("DELETE {}", url);

        let response = self.apply_auth(self.client.delete(&url)).send().await?;

        if !response.status().is_success() {
            return Err(Self::fault_from_response(response).await);
        }

        Ok(())
    }
}
