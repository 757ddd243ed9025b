//! Answer generation provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based answer generation
///
/// Implementations:
/// - `OpenAiGenerator`: OpenAI chat completions (gpt-4)
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Generate an answer from a system instruction and a user prompt
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
