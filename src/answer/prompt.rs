//! Prompt templates for retrieval-augmented answers

/// System instruction sent with every generation request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Prompt builder for QA generation
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved passages into a single context block
    pub fn build_context(passages: &[String]) -> String {
        passages.join("\n\n")
    }

    /// Build the user prompt from the context block and the question
    pub fn build_user_prompt(question: &str, context: &str) -> String {
        format!(
            "Answer this question based on the following context: {context}\n\nQuestion: {question}",
            context = context,
            question = question
        )
    }
}
