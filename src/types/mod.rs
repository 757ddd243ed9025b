//! Core types for the QA service

pub mod document;
pub mod query;
pub mod response;

pub use document::{Document, DocumentMetadata};
pub use query::Query;
pub use response::{AnswerResponse, IngestResponse};
