//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, ProviderEmbedding};
use crate::domain::DomainError;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single text
    async fn embed(&self, request: &EmbeddingRequest) -> Result<ProviderEmbedding, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::domain::usage::UsageStats;

    /// Deterministic embedder; vectors are derived from the text bytes
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
        fail_on: Option<String>,
        delays: HashMap<String, Duration>,
        finished: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
                fail_on: None,
                delays: HashMap::new(),
                finished: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Fail only for requests whose text equals `text`
        pub fn failing_on(mut self, text: impl Into<String>) -> Self {
            self.fail_on = Some(text.into());
            self
        }

        /// Sleep for `delay` before answering requests for `text`
        pub fn with_delay(mut self, text: impl Into<String>, delay: Duration) -> Self {
            self.delays.insert(text.into(), delay);
            self
        }

        /// Texts in the order their embeddings completed
        pub fn finished(&self) -> Vec<String> {
            self.finished.lock().unwrap().clone()
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn vector_for(&self, text: &str) -> Vec<f32> {
            let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            (0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64 * 7919) % 1000) as f32 / 1000.0) - 0.5)
                .collect()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(
            &self,
            request: &EmbeddingRequest,
        ) -> Result<ProviderEmbedding, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delays.get(&request.text) {
                tokio::time::sleep(*delay).await;
            }

            if let Some(ref error) = self.error {
                return Err(DomainError::provider_invocation(self.name, error));
            }
            if self.fail_on.as_deref() == Some(request.text.as_str()) {
                return Err(DomainError::provider_invocation(
                    self.name,
                    format!("failed to embed '{}'", request.text),
                ));
            }

            self.finished.lock().unwrap().push(request.text.clone());
            let prompt_units = (request.text.len() / 4).max(1) as u32;
            Ok(ProviderEmbedding::new(
                self.vector_for(&request.text),
                UsageStats::prompt_only(prompt_units),
            ))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new("test", 16);
            let request = EmbeddingRequest::new("Hello", "mock-embedding");

            let first = provider.embed(&request).await.unwrap();
            let second = provider.embed(&request).await.unwrap();

            assert_eq!(first.vector, second.vector);
            assert_eq!(first.vector.len(), 16);
            assert_eq!(provider.calls(), 2);
        }

        #[tokio::test]
        async fn test_failing_on_specific_text() {
            let provider = MockEmbeddingProvider::new("test", 4).failing_on("bad");

            assert!(provider.embed(&EmbeddingRequest::new("good", "m")).await.is_ok());
            let err = provider.embed(&EmbeddingRequest::new("bad", "m")).await.unwrap_err();
            assert!(matches!(err, DomainError::ProviderInvocation { .. }));
        }
    }
}
