//! Text generation over the OpenAI chat completions API

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    CompletionProvider, CompletionRequest, DomainError, ProviderCompletion, UsageStats,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const PROVIDER_NAME: &str = "openai";

/// Sends the prompt as a single user message
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    bearer: String,
    endpoint: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let root = base_url.into();

        Self {
            client,
            bearer: format!("Bearer {}", api_key.into()),
            endpoint: format!("{}/v1/chat/completions", root.trim_end_matches('/')),
        }
    }

    fn decode(&self, payload: serde_json::Value) -> Result<ProviderCompletion, DomainError> {
        let reply: ChatReply = serde_json::from_value(payload).map_err(|e| {
            DomainError::provider_invocation(PROVIDER_NAME, format!("unreadable chat payload: {e}"))
        })?;

        let first = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider_invocation(PROVIDER_NAME, "payload carried no choices"))?;

        // Usage is optional on some compatible servers.
        let usage = reply
            .usage
            .map(|u| UsageStats::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(ProviderCompletion::new(
            first.message.content.unwrap_or_default(),
            usage,
        ))
    }
}

#[async_trait]
impl<C: HttpClientTrait> CompletionProvider for OpenAiProvider<C> {
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

#[derive(Deserialize)]
struct ChatReply {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;
    use crate::infrastructure::http_client::HttpError;

    const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn chat_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 999}
        })
    }

    #[tokio::test]
    async fn test_openai_complete() {
        let client = MockHttpClient::new().with_response(CHAT_URL, chat_response("Hello there"));
        let provider = OpenAiProvider::new(client, "sk-chat");

        let request = CompletionRequest::new("Hello!", "gpt-4o-mini")
            .with_max_tokens(50)
            .with_temperature(0.2);
        let completion = provider.complete(&request).await.unwrap();

        assert_eq!(completion.text, "Hello there");
        assert_eq!(completion.usage, UsageStats::new(10, 8));
    }

    #[tokio::test]
    async fn test_openai_request_shape() {
        let client = MockHttpClient::new().with_response(CHAT_URL, chat_response("ok"));
        let provider = OpenAiProvider::new(client, "sk-test");

        provider
            .complete(&CompletionRequest::new("Say hi", "gpt-4o").with_max_tokens(10))
            .await
            .unwrap();

        let sent = &provider.client.requests()[0];
        assert_eq!(sent.method, "POST");
        assert_eq!(sent.header("Authorization"), Some("Bearer sk-test"));

        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 10);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Say hi");
    }

    #[tokio::test]
    async fn test_openai_status_error_names_provider() {
        let client = MockHttpClient::new().with_error(
            CHAT_URL,
            HttpError::Status {
                status: 401,
                body: "invalid api key".into(),
            },
        );
        let provider = OpenAiProvider::new(client, "invalid-key");

        let err = provider
            .complete(&CompletionRequest::new("Hello!", "gpt-4o"))
            .await
            .unwrap_err();

        match err {
            DomainError::ProviderInvocation { provider, message } => {
                assert_eq!(provider, "openai");
                assert!(message.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_openai_no_choices() {
        let client = MockHttpClient::new()
            .with_response(CHAT_URL, serde_json::json!({"choices": [], "usage": null}));
        let provider = OpenAiProvider::new(client, "key");

        let result = provider.complete(&CompletionRequest::new("Hi", "gpt-4o")).await;
        assert!(matches!(result, Err(DomainError::ProviderInvocation { .. })));
    }

    #[tokio::test]
    async fn test_openai_compatible_server_root() {
        let client = MockHttpClient::new()
            .with_response("http://vllm.local:8000/v1/chat/completions", chat_response("Custom"));
        let provider = OpenAiProvider::with_base_url(client, "local-key", "http://vllm.local:8000/");

        let completion = provider
            .complete(&CompletionRequest::new("Test", "gpt-4o"))
            .await
            .unwrap();

        assert_eq!(completion.text, "Custom");
    }
}
