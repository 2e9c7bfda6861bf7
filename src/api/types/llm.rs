//! Text generation and embedding request bodies

use serde::Deserialize;

use crate::domain::embedding::DEFAULT_EMBEDDING_MODEL;
use crate::domain::llm::{DEFAULT_COMPLETION_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::domain::{CompletionRequest, EmbeddingRequest, ProviderName};

pub(crate) fn default_provider() -> String {
    ProviderName::OpenAi.as_str().to_string()
}

pub(crate) fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

/// POST /api/llm/generate
#[derive(Debug, Clone, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl TextGenerationRequest {
    /// Split into the dispatcher's request and the provider name
    pub fn into_parts(self) -> (CompletionRequest, String) {
        let request = CompletionRequest::new(self.prompt, self.model)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        (request, self.provider)
    }
}

/// POST /api/llm/embedding
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmbeddingRequest {
    pub text: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl CreateEmbeddingRequest {
    pub fn into_parts(self) -> (EmbeddingRequest, String) {
        (EmbeddingRequest::new(self.text, self.model), self.provider)
    }
}
