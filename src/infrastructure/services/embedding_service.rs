//! Embedding dispatcher - routes a single text to the named embedding provider

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::{DomainError, EmbeddingRequest, EmbeddingResult};
use crate::infrastructure::observability::{record_provider_request, ProviderRequestMetric};
use crate::infrastructure::registry::ProviderRegistry;

#[derive(Debug, Clone)]
pub struct EmbeddingService {
    registry: Arc<ProviderRegistry>,
}

impl EmbeddingService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub async fn embed(
        &self,
        request: EmbeddingRequest,
        provider: &str,
    ) -> Result<EmbeddingResult, DomainError> {
        request.validate()?;

        let adapter = self.registry.resolve_embedding_provider(provider).await?;
        let started = Instant::now();
        let outcome = adapter.embed(&request).await;

        record_provider_request(ProviderRequestMetric {
            provider: adapter.provider_name(),
            model: &request.model,
            operation: "embedding",
            duration: started.elapsed(),
            usage: outcome.as_ref().ok().map(|embedding| embedding.usage),
        });

        let embedding = outcome.inspect_err(|e| {
            warn!(provider = adapter.provider_name(), model = %request.model, error = %e, "Embedding failed");
        })?;

        if embedding.vector.is_empty() {
            return Err(DomainError::provider_invocation(
                adapter.provider_name(),
                "Provider returned an empty embedding",
            ));
        }

        debug!(
            provider = adapter.provider_name(),
            model = %request.model,
            dimensions = embedding.vector.len(),
            "Embedding succeeded"
        );

        Ok(EmbeddingResult::new(
            embedding.vector,
            request.model,
            embedding.usage,
        ))
    }
}
