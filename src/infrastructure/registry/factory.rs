use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::{CompletionProvider, DomainError, EmbeddingProvider, ProviderName};
use crate::infrastructure::embedding::OpenAiEmbeddingProvider;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::llm::{
    AnthropicProvider, OpenAiProvider, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_OPENAI_BASE_URL,
};

/// Builds provider instances once credentials have been checked.
///
/// Implementations must not perform network I/O.
pub trait ProviderFactory: Send + Sync + Debug {
    fn create_completion(
        &self,
        name: ProviderName,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Arc<dyn CompletionProvider>, DomainError>;

    fn create_embedding(
        &self,
        name: ProviderName,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError>;
}

/// Factory for the HTTP adapters; every instance shares one connection pool
#[derive(Debug, Clone, Default)]
pub struct HttpProviderFactory {
    client: HttpClient,
}

impl HttpProviderFactory {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl ProviderFactory for HttpProviderFactory {
    fn create_completion(
        &self,
        name: ProviderName,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Arc<dyn CompletionProvider>, DomainError> {
        let client = self.client.clone();

        match name {
            ProviderName::OpenAi => Ok(Arc::new(OpenAiProvider::with_base_url(
                client,
                api_key,
                base_url.unwrap_or(DEFAULT_OPENAI_BASE_URL),
            ))),
            ProviderName::Anthropic => Ok(Arc::new(AnthropicProvider::with_base_url(
                client,
                api_key,
                base_url.unwrap_or(DEFAULT_ANTHROPIC_BASE_URL),
            ))),
        }
    }

    fn create_embedding(
        &self,
        name: ProviderName,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        match name {
            ProviderName::OpenAi => Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
                self.client.clone(),
                api_key,
                base_url.unwrap_or(DEFAULT_OPENAI_BASE_URL),
            ))),
            ProviderName::Anthropic => Err(DomainError::unsupported_provider(name.as_str())),
        }
    }
}
