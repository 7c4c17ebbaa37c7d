//! Vector index specification and create-if-absent client.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IndexFault, IndexFaultKind, SearchError, SearchResult};

/// Index settings for a knn-enabled vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(rename = "index.knn")]
    pub knn: String,
    pub number_of_shards: u32,
    #[serde(rename = "knn.algo_param.ef_search")]
    pub ef_search: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            knn: "true".to_string(),
            number_of_shards: 1,
            ef_search: 512,
            number_of_replicas: 0,
        }
    }
}

/// Approximate-nearest-neighbor method configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnMethod {
    pub name: String,
    pub engine: String,
    pub space_type: String,
}

impl Default for KnnMethod {
    fn default() -> Self {
        Self {
            name: "hnsw".to_string(),
            engine: "faiss".to_string(),
            space_type: "l2".to_string(),
        }
    }
}

/// Vector field mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub dimension: u32,
    pub method: KnnMethod,
}

impl Default for VectorField {
    fn default() -> Self {
        Self {
            field_type: "knn_vector".to_string(),
            dimension: 256,
            method: KnnMethod::default(),
        }
    }
}

/// Plain text field mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextField {
    #[serde(rename = "type")]
    pub field_type: String,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            field_type: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMappingProperties {
    pub vector: VectorField,
    #[serde(rename = "AMAZON_BEDROCK_TEXT_CHUNK")]
    pub text_chunk: TextField,
    #[serde(rename = "AMAZON_BEDROCK_METADATA")]
    pub metadata: TextField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMappings {
    pub properties: IndexMappingProperties,
}

/// Full index body submitted on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSpec {
    pub settings: IndexSettings,
    pub mappings: IndexMappings,
}

impl Default for IndexSpec {
    fn default() -> Self {
        Self {
            settings: IndexSettings::default(),
            mappings: IndexMappings {
                properties: IndexMappingProperties {
                    vector: VectorField::default(),
                    text_chunk: TextField::default(),
                    metadata: TextField::default(),
                },
            },
        }
    }
}

impl IndexSpec {
    pub fn dimension(mut self, dimension: u32) -> Self {
        self.mappings.properties.vector.dimension = dimension;
        self
    }

    pub fn shards(mut self, shards: u32) -> Self {
        self.settings.number_of_shards = shards;
        self
    }

    pub fn replicas(mut self, replicas: u32) -> Self {
        self.settings.number_of_replicas = replicas;
        self
    }

    pub fn ef_search(mut self, ef_search: u32) -> Self {
        self.settings.ef_search = ef_search;
        self
    }
}

/// Outcome of an ensure call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    Created,
    AlreadyExists,
}

/// Structured error envelope returned by the search service.
#[derive(Debug, Deserialize)]
struct IndexErrorEnvelope {
    error: IndexErrorBody,
}

#[derive(Debug, Deserialize)]
struct IndexErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    #[serde(default)]
    reason: String,
}

/// Map a service error type to its fault kind. The only place wire error
/// types are interpreted.
pub fn classify_error_type(error_type: &str) -> IndexFaultKind {
    match error_type {
        "resource_already_exists_exception" => IndexFaultKind::AlreadyExists,
        _ => IndexFaultKind::Other,
    }
}

/// Client for idempotent index provisioning.
pub struct IndexClient {
    endpoint: String,
    /// Pre-built authorization header value, passed through verbatim.
    auth_header: Option<String>,
    client: reqwest::Client,
}

impl IndexClient {
    /// Create a client for the given search endpoint.
    pub fn new(endpoint: impl Into<String>) -> SearchResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(SearchError::InvalidEndpoint(
                "endpoint must not be empty".to_string(),
            ));
        }

        Ok(Self {
            endpoint,
            auth_header: None,
            client: reqwest::Client::new(),
        })
    }

    pub fn auth_header(mut self, value: impl Into<String>) -> Self {
        self.auth_header = Some(value.into());
        self
    }

    fn index_url(&self, index_name: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), index_name)
    }

    /// Create the index if it does not exist.
    ///
    /// An already-exists rejection maps to [`Ensured::AlreadyExists`] and is
    /// not an error; any other fault surfaces unmodified.
    pub async fn ensure_index(&self, index_name: &str, spec: &IndexSpec) -> SearchResult<Ensured> {
        let url = self.index_url(index_name);
        debug!("PUT {}", url);
        info!("Creating index: {index_name}");

        let mut builder = self.client.put(&url).json(spec);
        if let Some(auth) = &self.auth_header {
            builder = builder.header("Authorization", auth);
        }

        let response = builder.send().await?;

        if response.status().is_success() {
            info!("Index {index_name} created successfully.");
            return Ok(Ensured::Created);
        }

        let status = response.status();
        let fault = match response.json::<IndexErrorEnvelope>().await {
            Ok(envelope) => IndexFault {
                kind: classify_error_type(&envelope.error.error_type),
                error_type: envelope.error.error_type,
                reason: envelope.error.reason,
            },
            Err(_) => IndexFault {
                kind: IndexFaultKind::Other,
                error_type: status.as_str().to_string(),
                reason: format!("service returned HTTP {status} with an unreadable body"),
            },
        };

        if fault.kind == IndexFaultKind::AlreadyExists {
            info!("Index {index_name} already exists. Skipping creation.");
            return Ok(Ensured::AlreadyExists);
        }

        Err(SearchError::Index(fault))
    }
}
