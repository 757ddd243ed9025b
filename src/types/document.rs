//! Document types

use serde::{Deserialize, Serialize};

/// A document submitted for ingestion
///
/// The title doubles as the index identifier: re-ingesting a title
/// overwrites the prior entry (upsert semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Title, unique across the index
    pub title: String,
    /// Full text content
    pub content: String,
    /// Tags used for filtered retrieval
    pub tags: Vec<String>,
}

impl Document {
    /// Create a new document
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }
}

/// Metadata stored alongside a vector in the index and returned by search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub tags: Vec<String>,
    pub content: String,
}

impl From<&Document> for DocumentMetadata {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            tags: doc.tags.clone(),
            content: doc.content.clone(),
        }
    }
}
