//! Completion dispatcher - routes a generation request to the named provider

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::{CompletionRequest, DomainError, GenerationResult};
use crate::infrastructure::observability::{record_provider_request, ProviderRequestMetric};
use crate::infrastructure::registry::ProviderRegistry;

#[derive(Debug, Clone)]
pub struct CompletionService {
    registry: Arc<ProviderRegistry>,
}

impl CompletionService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Generate text with `provider`; the requested model is echoed back, not the vendor's name for it
    pub async fn generate(
        &self,
        request: CompletionRequest,
        provider: &str,
    ) -> Result<GenerationResult, DomainError> {
        request.validate()?;

        let adapter = self.registry.resolve_completion_provider(provider).await?;
        let started = Instant::now();
        let outcome = adapter.complete(&request).await;

        record_provider_request(ProviderRequestMetric {
            provider: adapter.provider_name(),
            model: &request.model,
            operation: "completion",
            duration: started.elapsed(),
            usage: outcome.as_ref().ok().map(|completion| completion.usage),
        });

        let completion = outcome.inspect_err(|e| {
            warn!(provider = adapter.provider_name(), model = %request.model, error = %e, "Completion failed");
        })?;

        debug!(
            provider = adapter.provider_name(),
            model = %request.model,
            total_tokens = completion.usage.total_units,
            "Completion succeeded"
        );

        Ok(GenerationResult::new(
            completion.text,
            request.model,
            completion.usage,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockCompletionProvider;
    use crate::domain::UsageStats;
    use crate::infrastructure::registry::FixedProviderFactory;

    fn service_with(provider: Arc<MockCompletionProvider>) -> CompletionService {
        let factory = FixedProviderFactory::new().with_completion(provider);
        CompletionService::new(Arc::new(ProviderRegistry::for_tests(Arc::new(factory))))
    }

    #[tokio::test]
    async fn test_generate_returns_text_model_and_usage() {
        let mock = Arc::new(MockCompletionProvider::new("openai").with_response("Hi!", UsageStats::new(3, 1)));
        let service = service_with(mock.clone());

        let request = CompletionRequest::new("Say hi", "m")
            .with_max_tokens(10)
            .with_temperature(0.0);
        let result = service.generate(request, "openai").await.unwrap();

        assert_eq!(result.text, "Hi!");
        assert_eq!(result.model, "m");
        assert_eq!(result.usage, UsageStats::new(3, 1));
        assert_eq!(result.usage.total_units, 4);

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].prompt, "Say hi");
        assert_eq!(sent[0].max_tokens, 10);
    }

    #[tokio::test]
    async fn test_generate_unknown_provider() {
        let service = service_with(Arc::new(MockCompletionProvider::new("openai")));

        let err = service
            .generate(CompletionRequest::new("hello", "m"), "cohere")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::UnsupportedProvider { .. }));
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_parameters_before_dispatch() {
        let mock = Arc::new(MockCompletionProvider::new("openai").with_response("x", UsageStats::default()));
        let service = service_with(mock.clone());

        let err = service
            .generate(CompletionRequest::new("hello", "m").with_max_tokens(0), "openai")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generate_propagates_provider_failure() {
        let mock = Arc::new(MockCompletionProvider::new("anthropic").with_error("HTTP 529: overloaded"));
        let service = service_with(mock);

        let err = service
            .generate(CompletionRequest::new("hello", "claude-3-haiku"), "anthropic")
            .await
            .unwrap_err();

        match err {
            DomainError::ProviderInvocation { provider, message } => {
                assert_eq!(provider, "anthropic");
                assert!(message.contains("529"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
