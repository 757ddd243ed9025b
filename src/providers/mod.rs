//! Provider abstractions for embeddings, answer generation, and the vector index
//!
//! Trait-based seams keep the pipelines independent of the concrete external
//! services behind them.

pub mod embedding;
pub mod generation;
pub mod openai;
pub mod pinecone;
pub mod vector_index;

pub use embedding::EmbeddingProvider;
pub use generation::AnswerProvider;
pub use vector_index::{SearchFilter, SearchMatch, VectorIndex, VectorRecord};
