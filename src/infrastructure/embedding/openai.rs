//! Embeddings over the OpenAI `/v1/embeddings` endpoint

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, EmbeddingProvider, EmbeddingRequest, ProviderEmbedding, UsageStats};
use crate::infrastructure::http_client::HttpClientTrait;
use crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL;

const PROVIDER_NAME: &str = "openai";

#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    bearer: String,
    endpoint: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Points the adapter at an OpenAI-compatible server rooted at `base_url`
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let root = base_url.into();

        Self {
            client,
            bearer: format!("Bearer {}", api_key.into()),
            endpoint: format!("{}/v1/embeddings", root.trim_end_matches('/')),
        }
    }

    fn decode(&self, payload: serde_json::Value) -> Result<ProviderEmbedding, DomainError> {
        let envelope: EmbeddingsEnvelope = serde_json::from_value(payload).map_err(|e| {
            DomainError::provider_invocation(PROVIDER_NAME, format!("unreadable embedding payload: {e}"))
        })?;

        // Single input, so the lowest index is the only vector we asked for.
        let vector = envelope
            .data
            .into_iter()
            .min_by_key(|item| item.index)
            .map(|item| item.embedding)
            .ok_or_else(|| DomainError::provider_invocation(PROVIDER_NAME, "payload carried no embedding"))?;

        Ok(ProviderEmbedding::new(
            vector,
            UsageStats::prompt_only(envelope.usage.prompt_tokens),
        ))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: &EmbeddingRequest) -> Result<ProviderEmbedding, DomainError> {
        let body = serde_json::to_value(EmbeddingsCall {
            model: &request.model,
            input: &request.text,
        })
        .map_err(|e| DomainError::internal(e.to_string()))?;

        let headers = [
            ("Authorization", self.bearer.as_str()),
            ("Content-Type", "application/json"),
        ];

        let payload = self
            .client
            .post_json(&self.endpoint, headers.to_vec(), &body)
            .await
            .map_err(|e| DomainError::provider_invocation(PROVIDER_NAME, e.to_string()))?;

        self.decode(payload)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[derive(Serialize)]
struct EmbeddingsCall<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsEnvelope {
    data: Vec<EmbeddingItem>,
    usage: EnvelopeUsage,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EnvelopeUsage {
    prompt_tokens: u32,
}
