//! corpus-rag: document ingestion and retrieval-augmented question answering
//!
//! This crate provides an HTTP service that accepts documents, embeds them
//! through an external embedding provider, stores the vectors in an external
//! vector index, and answers natural-language questions by retrieving the
//! most similar documents and conditioning a generative model on them.
//! Ingestion runs asynchronously with per-task progress tracking; question
//! answering runs synchronously on the calling request.

pub mod answer;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod progress;
pub mod providers;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::Document,
    query::Query,
    response::{AnswerResponse, IngestResponse},
};
