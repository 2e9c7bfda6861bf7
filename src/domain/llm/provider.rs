use async_trait::async_trait;
use std::fmt::Debug;

use super::{CompletionRequest, ProviderCompletion};
use crate::domain::DomainError;

/// Trait for text generation providers (OpenAI, Anthropic, etc.)
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Generate text for a single prompt
    async fn complete(&self, request: &CompletionRequest)
    -> Result<ProviderCompletion, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::usage::UsageStats;

    #[derive(Debug)]
    pub struct MockCompletionProvider {
        name: &'static str,
        response: Option<ProviderCompletion>,
        error: Option<String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockCompletionProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                response: None,
                error: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(mut self, text: impl Into<String>, usage: UsageStats) -> Self {
            self.response = Some(ProviderCompletion::new(text, usage));
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for MockCompletionProvider {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<ProviderCompletion, DomainError> {
            self.requests.lock().unwrap().push(request.clone());

            if let Some(ref error) = self.error {
                return Err(DomainError::provider_invocation(self.name, error));
            }

            self.response.clone().ok_or_else(|| {
                DomainError::provider_invocation(self.name, "No mock response configured")
            })
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
