//! Configuration for the QA service
//!
//! Every collaborator client receives its configuration explicitly at
//! construction; nothing reads ambient global state after startup.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Vector index configuration
    pub index: IndexConfig,
    /// Answer generation configuration
    pub generation: GenerationConfig,
    /// Progress tracker bounds
    pub tracker: TrackerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API base URL
    pub base_url: String,
    /// API key for bearer auth
    pub api_key: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensionality, fixed at the model's native size
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "text-embedding-ada-002".to_string(),
            dimensions: 1536,
            timeout_secs: 30,
        }
    }
}

/// Vector index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index data-plane host, e.g. "https://document-embeddings-xyz.svc.us-west1-gcp.pinecone.io"
    pub host: String,
    /// API key
    pub api_key: String,
    /// Optional namespace within the index
    #[serde(default)]
    pub namespace: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            namespace: None,
            timeout_secs: 30,
        }
    }
}

/// Answer generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API base URL
    pub base_url: String,
    /// API key for bearer auth
    pub api_key: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
        }
    }
}

/// Progress tracker bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum tracked tasks before the stalest entry is evicted
    pub max_entries: usize,
    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_entries: 4096,
            ttl_secs: 86400,
        }
    }
}

impl RagConfig {
    /// Load configuration from the environment.
    ///
    /// `OPENAI_API_KEY`, `PINECONE_API_KEY`, and `PINECONE_INDEX_HOST` are
    /// required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.embedding.api_key = require_env("OPENAI_API_KEY")?;
        config.generation.api_key = config.embedding.api_key.clone();
        config.index.api_key = require_env("PINECONE_API_KEY")?;
        config.index.host = require_env("PINECONE_INDEX_HOST")?;

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid SERVER_PORT: {}", e)))?;
        }
        if let Ok(namespace) = env::var("PINECONE_NAMESPACE") {
            config.index.namespace = Some(namespace);
        }
        if let Ok(model) = env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(model) = env::var("GENERATION_MODEL") {
            config.generation.model = model;
        }

        Ok(config)
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{} is not set", name)))
}
