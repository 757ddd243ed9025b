//! Query request types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::providers::vector_index::SearchFilter;

/// Query request for the QA endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// The question to answer
    pub question: String,

    /// Number of most relevant documents to retrieve (default: 3)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Titles or tags to restrict the search to; absent means no filter
    #[serde(default)]
    pub document_filter: Option<Vec<String>>,
}

fn default_top_k() -> usize {
    3
}

impl Query {
    /// Create a new query with defaults
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: default_top_k(),
            document_filter: None,
        }
    }

    /// Set the number of results to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Restrict the search to documents matching the given titles or tags
    pub fn with_filter(mut self, terms: Vec<String>) -> Self {
        self.document_filter = Some(terms);
        self
    }

    /// Reject requests the pipelines cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::validation("top_k must be a positive integer"));
        }
        Ok(())
    }

    /// Effective search filter; an absent or empty filter list means unfiltered
    pub fn search_filter(&self) -> Option<SearchFilter> {
        match self.document_filter.as_deref() {
            Some(terms) if !terms.is_empty() => {
                Some(SearchFilter::title_or_tags(terms.to_vec()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_defaults_to_three() {
        let query: Query = serde_json::from_str(r#"{"question": "what is x?"}"#).unwrap();
        assert_eq!(query.top_k, 3);
        assert!(query.document_filter.is_none());
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let query = Query::new("what is x?").with_top_k(0);
        assert!(matches!(query.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_absent_and_empty_filters_are_unfiltered() {
        let query = Query::new("what is x?");
        assert!(query.search_filter().is_none());

        let query = Query::new("what is x?").with_filter(vec![]);
        assert!(query.search_filter().is_none());
    }

    #[test]
    fn test_filter_terms_are_carried_through() {
        let query = Query::new("what is x?").with_filter(vec!["x".to_string()]);
        let filter = query.search_filter().unwrap();
        assert_eq!(filter.terms, vec!["x".to_string()]);
    }
}
