//! Retrieval-augmented answer pipeline
//!
//! Embeds the question, retrieves the most similar documents, and generates
//! an answer conditioned on the retrieved context. Runs synchronously on the
//! calling task; each step blocks until the external provider responds.

pub mod prompt;

pub use prompt::PromptBuilder;

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{AnswerProvider, EmbeddingProvider, VectorIndex};
use crate::types::query::Query;
use crate::types::response::AnswerResponse;

use prompt::SYSTEM_PROMPT;

/// Pipeline that answers questions against the indexed documents
pub struct AnswerPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn AnswerProvider>,
}

impl AnswerPipeline {
    /// Create a new pipeline
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn AnswerProvider>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
        }
    }

    /// Answer a question
    ///
    /// An empty result set is not an error: generation proceeds with an
    /// empty context block and the provider's own behavior governs the
    /// answer.
    pub async fn answer(&self, query: &Query) -> Result<AnswerResponse> {
        query.validate()?;

        tracing::info!("Answering: \"{}\"", query.question);

        let embedding = self.embedder.embed(&query.question).await?;

        let filter = query.search_filter();
        let matches = self
            .index
            .search(&embedding, query.top_k, filter.as_ref())
            .await?;

        // Context in the order returned by the search; the provider ranks by
        // descending similarity
        let context: Vec<String> = matches
            .into_iter()
            .filter_map(|m| m.metadata.map(|meta| meta.content))
            .collect();

        let context_block = PromptBuilder::build_context(&context);
        let user_prompt = PromptBuilder::build_user_prompt(&query.question, &context_block);

        let answer = self.generator.generate(SYSTEM_PROMPT, &user_prompt).await?;

        tracing::info!(
            "Answer generated from {} context passage(s)",
            context.len()
        );

        Ok(AnswerResponse { answer, context })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::providers::testing::{CannedGenerator, RecordingIndex, StaticEmbedder};
    use crate::providers::vector_index::{SearchFilter, SearchMatch};
    use crate::types::document::DocumentMetadata;

    fn search_match(title: &str, content: &str, score: f32) -> SearchMatch {
        SearchMatch {
            id: title.to_string(),
            score,
            metadata: Some(DocumentMetadata {
                title: title.to_string(),
                tags: vec![],
                content: content.to_string(),
            }),
        }
    }

    fn pipeline(
        index: Arc<RecordingIndex>,
        generator: Arc<CannedGenerator>,
    ) -> AnswerPipeline {
        AnswerPipeline::new(
            Arc::new(StaticEmbedder {
                vector: vec![0.1, 0.2],
                fail: false,
            }),
            index,
            generator,
        )
    }

    #[tokio::test]
    async fn test_answer_returns_context_in_search_order() {
        let index = Arc::new(RecordingIndex {
            matches: vec![
                search_match("A", "alpha", 0.9),
                search_match("B", "beta", 0.7),
            ],
            ..Default::default()
        });
        let generator = Arc::new(CannedGenerator {
            answer: "the answer".to_string(),
            ..Default::default()
        });

        let response = pipeline(Arc::clone(&index), Arc::clone(&generator))
            .answer(&Query::new("what is x?"))
            .await
            .unwrap();

        assert_eq!(response.answer, "the answer");
        assert_eq!(response.context, vec!["alpha".to_string(), "beta".to_string()]);

        // The generation prompt carries the joined context and the question
        let prompts = generator.prompts.lock();
        let (system, user) = &prompts[0];
        assert_eq!(system, "You are a helpful assistant.");
        assert!(user.contains("alpha\n\nbeta"));
        assert!(user.contains("Question: what is x?"));
    }

    #[tokio::test]
    async fn test_context_is_bounded_by_top_k() {
        let index = Arc::new(RecordingIndex {
            matches: vec![
                search_match("A", "alpha", 0.9),
                search_match("B", "beta", 0.7),
                search_match("C", "gamma", 0.5),
            ],
            ..Default::default()
        });
        let generator = Arc::new(CannedGenerator::default());

        let response = pipeline(Arc::clone(&index), generator)
            .answer(&Query::new("what is x?").with_top_k(2))
            .await
            .unwrap();

        assert_eq!(response.context.len(), 2);
        assert_eq!(index.queries.lock()[0].0, 2);
    }

    #[tokio::test]
    async fn test_empty_index_is_not_an_error() {
        let index = Arc::new(RecordingIndex::default());
        let generator = Arc::new(CannedGenerator {
            answer: "nothing to go on".to_string(),
            ..Default::default()
        });

        let response = pipeline(index, Arc::clone(&generator))
            .answer(&Query::new("what is x?"))
            .await
            .unwrap();

        assert_eq!(response.answer, "nothing to go on");
        assert!(response.context.is_empty());
    }

    #[tokio::test]
    async fn test_document_filter_is_passed_to_the_index() {
        let index = Arc::new(RecordingIndex::default());
        let generator = Arc::new(CannedGenerator::default());

        pipeline(Arc::clone(&index), Arc::clone(&generator))
            .answer(&Query::new("what is x?").with_filter(vec!["x".to_string()]))
            .await
            .unwrap();
        pipeline(Arc::clone(&index), generator)
            .answer(&Query::new("what is x?"))
            .await
            .unwrap();

        let queries = index.queries.lock();
        assert_eq!(
            queries[0].1,
            Some(SearchFilter::title_or_tags(vec!["x".to_string()]))
        );
        assert_eq!(queries[1].1, None);
    }

    #[tokio::test]
    async fn test_zero_top_k_is_rejected() {
        let result = pipeline(
            Arc::new(RecordingIndex::default()),
            Arc::new(CannedGenerator::default()),
        )
        .answer(&Query::new("what is x?").with_top_k(0))
        .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let result = pipeline(
            Arc::new(RecordingIndex::default()),
            Arc::new(CannedGenerator {
                fail: true,
                ..Default::default()
            }),
        )
        .answer(&Query::new("what is x?"))
        .await;

        assert!(matches!(result, Err(Error::Generation(_))));
    }
}
