//! Vector index provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::document::DocumentMetadata;

/// One vector record, keyed by document title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Stable identifier; the document title
    pub id: String,
    /// Embedding vector
    pub values: Vec<f32>,
    /// Metadata stored with the vector
    pub metadata: DocumentMetadata,
}

/// A match returned by similarity search, ranked by descending similarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: String,
    pub score: f32,
    pub metadata: Option<DocumentMetadata>,
}

/// Metadata predicate restricting a similarity search
///
/// Matches entries whose title is one of `terms` or that carry any tag in
/// `terms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub terms: Vec<String>,
}

impl SearchFilter {
    /// Build a title-or-tags membership filter
    pub fn title_or_tags(terms: Vec<String>) -> Self {
        Self { terms }
    }
}

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `PineconeClient`: Pinecone index over its REST data plane
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite a record keyed by its id
    async fn upsert(&self, record: VectorRecord) -> Result<()>;

    /// Search for the `top_k` nearest neighbors, metadata included
    async fn search(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchMatch>>;

    /// Index-wide statistics, passed through verbatim
    async fn stats(&self) -> Result<serde_json::Value>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
