//! OpenAI-backed providers for embeddings and answer generation
//!
//! One `OpenAiClient` wraps the HTTP plumbing; the embedding and generation
//! providers layer the trait contracts on top. Failures are terminal for the
//! invocation: no automatic retry of any call.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{EmbeddingConfig, GenerationConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::generation::AnswerProvider;

/// OpenAI API client shared by the embedding and generation providers
pub struct OpenAiClient {
    /// HTTP client
    client: Client,
    /// API base URL
    base_url: String,
    /// API key for bearer auth
    api_key: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Generate an embedding for a single text
    async fn embed_text(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/v1/embeddings", self.base_url);
        let request = EmbeddingRequest { model, input: text };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Embedding failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse embedding response: {}", e)))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::Embedding("Embedding response contained no data".to_string()))
    }

    /// Run one chat completion with a system and a user message
    async fn chat(
        &self,
        model: &str,
        temperature: f32,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse generation response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Generation("Generation response contained no choices".to_string()))
    }
}

/// OpenAI embedding provider
pub struct OpenAiEmbedder {
    client: Arc<OpenAiClient>,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Create a new embedder
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = Arc::new(OpenAiClient::new(
            &config.base_url,
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
        )?);

        Ok(Self {
            client,
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed_text(&self.model, text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// OpenAI chat-completions provider for answer generation
pub struct OpenAiGenerator {
    client: Arc<OpenAiClient>,
    model: String,
    temperature: f32,
}

impl OpenAiGenerator {
    /// Create a new generator
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = Arc::new(OpenAiClient::new(
            &config.base_url,
            &config.api_key,
            Duration::from_secs(config.timeout_secs),
        )?);

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl AnswerProvider for OpenAiGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        tracing::debug!("Generating answer with model: {}", self.model);
        self.client
            .chat(&self.model, self.temperature, system_prompt, user_prompt)
            .await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
