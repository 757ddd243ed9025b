//! Pinecone vector index client
//!
//! Talks to the data plane of one Pinecone index over its REST API: upsert,
//! query, and index statistics. Failures are terminal for the invocation; no
//! automatic retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::types::document::DocumentMetadata;

use super::vector_index::{SearchFilter, SearchMatch, VectorIndex, VectorRecord};

/// Pinecone index client
pub struct PineconeClient {
    /// HTTP client
    client: Client,
    /// Index data-plane host
    host: String,
    /// API key
    api_key: String,
    /// Optional namespace within the index
    namespace: Option<String>,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<&'a VectorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<DocumentMetadata>,
}

impl PineconeClient {
    /// Create a new client for one index
    pub fn new(config: &IndexConfig) -> Result<Self> {
        if config.host.is_empty() {
            return Err(Error::Config("Vector index host is not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            namespace: config.namespace.clone(),
        })
    }

    /// Translate the domain filter into Pinecone's metadata filter language:
    /// title in terms OR any tag in terms.
    fn build_filter(filter: &SearchFilter) -> serde_json::Value {
        serde_json::json!({
            "$or": [
                { "title": { "$in": filter.terms } },
                { "tags": { "$in": filter.terms } },
            ]
        })
    }
}

#[async_trait]
impl VectorIndex for PineconeClient {
    async fn upsert(&self, record: VectorRecord) -> Result<()> {
        let url = format!("{}/vectors/upsert", self.host);
        let request = UpsertRequest {
            vectors: vec![&record],
            namespace: self.namespace.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Index(format!("Upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Index(format!(
                "Upsert failed: HTTP {} - {}",
                status, body
            )));
        }

        tracing::debug!("Upserted vector '{}'", record.id);
        Ok(())
    }

    async fn search(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchMatch>> {
        let url = format!("{}/query", self.host);
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            filter: filter.map(Self::build_filter),
            namespace: self.namespace.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Index(format!("Query request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Index(format!(
                "Query failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Index(format!("Failed to parse query response: {}", e)))?;

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| SearchMatch {
                id: m.id,
                score: m.score,
                metadata: m.metadata,
            })
            .collect())
    }

    async fn stats(&self) -> Result<serde_json::Value> {
        let url = format!("{}/describe_index_stats", self.host);

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Error::Index(format!("Stats request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Index(format!(
                "Stats failed: HTTP {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Index(format!("Failed to parse stats response: {}", e)))
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}
