//! Client configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP provisioner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionerConfig {
    /// Service endpoint base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Pre-resolved bearer token, passed through verbatim.
    pub auth_token: Option<String>,
}

impl ProvisionerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: 60,
            auth_token: None,
        }
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ProvisionerConfig::new("https://provision.example.com")
            .timeout(120)
            .auth_token("secret");

        assert_eq!(config.base_url, "https://provision.example.com");
        assert_eq!(config.timeout_seconds, 120);
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_config_defaults() {
        let config = ProvisionerConfig::new("http://localhost:8080");
        assert_eq!(config.timeout_seconds, 60);
        assert!(config.auth_token.is_none());
    }
}
