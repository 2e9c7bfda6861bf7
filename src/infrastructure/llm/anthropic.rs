//! Text generation over the Anthropic messages API

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    CompletionProvider, CompletionRequest, DomainError, ProviderCompletion, UsageStats,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const PROVIDER_NAME: &str = "anthropic";

#[derive(Debug)]
pub struct AnthropicProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    endpoint: String,
}

impl<C: HttpClientTrait> AnthropicProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_ANTHROPIC_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let root = base_url.into();

        Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}/v1/messages", root.trim_end_matches('/')),
        }
    }

    fn decode(&self, payload: serde_json::Value) -> Result<ProviderCompletion, DomainError> {
        let reply: MessagesReply = serde_json::from_value(payload).map_err(|e| {
            DomainError::provider_invocation(PROVIDER_NAME, format!("unreadable messages payload: {e}"))
        })?;

        let text: String = reply
            .content
            .into_iter()
            .filter_map(|block| match block {
                Block::Text { text } => Some(text),
                Block::Other => None,
            })
            .collect();

        // input/output tokens map onto prompt/completion units
        let usage = UsageStats::new(reply.usage.input_tokens, reply.usage.output_tokens);

        Ok(ProviderCompletion::new(text, usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for AnthropicProvider<C> {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<ProviderCompletion, DomainError> {
        let body = serde_json::json!({
            "model": request.model,
            "messages": [{"role": "user", "content": request.prompt}],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });
        let headers = [
            ("x-api-key", self.api_key.as_str()),
            ("anthropic-version", API_VERSION),
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

#[derive(Deserialize)]
struct MessagesReply {
    content: Vec<Block>,
    usage: MessagesUsage,
}

/// Only text blocks contribute to the generated text
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Block {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct MessagesUsage {
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use crate::infrastructure::http_client::HttpError;

    const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

    #[tokio::test]
    async fn test_anthropic_joins_text_blocks() {
        let reply = serde_json::json!({
            "id": "msg_123",
            "type": "message",
            "model": "claude-3-5-haiku-20241022",
            "content": [
                {"type": "text", "text": "Hello"},
                {"type": "tool_use", "id": "t1", "name": "noop", "input": {}},
                {"type": "text", "text": ", world"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 3, "output_tokens": 1}
        });

        let client = MockHttpClient::new().with_response(MESSAGES_URL, reply);
        let provider = AnthropicProvider::new(client, "sk-ant-test");

        let completion = provider
            .complete(&CompletionRequest::new("Say hi", "claude-3-5-haiku-20241022"))
            .await
            .unwrap();

        assert_eq!(completion.text, "Hello, world");
        assert_eq!(completion.usage.prompt_units, 3);
        assert_eq!(completion.usage.completion_units, 1);
        assert_eq!(completion.usage.total_units, 4);
    }

    #[tokio::test]
    async fn test_anthropic_headers() {
        let client = MockHttpClient::new().with_response(
            MESSAGES_URL,
            serde_json::json!({"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}),
        );
        let provider = AnthropicProvider::new(client, "sk-ant");

        provider
            .complete(&CompletionRequest::new("Hi", "claude-3-opus-20240229"))
            .await
            .unwrap();

        let sent = &provider.client.requests()[0];
        assert_eq!(sent.header("x-api-key"), Some("sk-ant"));
        assert_eq!(sent.header("anthropic-version"), Some("2023-06-01"));
        assert_eq!(sent.body.as_ref().unwrap()["max_tokens"], 500);
    }

    #[tokio::test]
    async fn test_anthropic_transport_error_names_provider() {
        let client = MockHttpClient::new()
            .with_error(MESSAGES_URL, HttpError::Request("connection refused".into()));
        let provider = AnthropicProvider::new(client, "key");

        let err = provider
            .complete(&CompletionRequest::new("Hi", "claude-3-opus-20240229"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, DomainError::ProviderInvocation { ref provider, .. } if provider == "anthropic")
        );
    }
}
