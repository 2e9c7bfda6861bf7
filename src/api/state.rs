//! Application state for shared services

use std::sync::Arc;

use crate::domain::{
    AuthProvider, CompletionRequest, Document, DomainError, EmbeddingRequest, EmbeddingResult,
    GenerationResult, SearchResult, VectorStore,
};
use crate::infrastructure::registry::ProviderRegistry;
use crate::infrastructure::services::{
    CompletionService, DocumentSearch, DocumentService, EmbeddingService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub completion_service: Arc<dyn CompletionServiceTrait>,
    pub embedding_service: Arc<dyn EmbeddingServiceTrait>,
    pub document_service: Arc<dyn DocumentServiceTrait>,
    pub auth_provider: Arc<dyn AuthProvider>,
    pub registry: Arc<ProviderRegistry>,
    pub vector_store: Arc<dyn VectorStore>,
    pub environment: String,
}

#[async_trait::async_trait]
pub trait CompletionServiceTrait: Send + Sync {
    async fn generate(
        &self,
        request: CompletionRequest,
        provider: &str,
    ) -> Result<GenerationResult, DomainError>;
}

#[async_trait::async_trait]
pub trait EmbeddingServiceTrait: Send + Sync {
    async fn embed(
        &self,
        request: EmbeddingRequest,
        provider: &str,
    ) -> Result<EmbeddingResult, DomainError>;
}

#[async_trait::async_trait]
pub trait DocumentServiceTrait: Send + Sync {
    async fn ingest(
        &self,
        documents: Vec<Document>,
        embedding_model: &str,
        provider: &str,
    ) -> Result<Vec<String>, DomainError>;
    async fn search(&self, search: DocumentSearch) -> Result<Vec<SearchResult>, DomainError>;
    async fn delete(&self, ids: &[String]) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl CompletionServiceTrait for CompletionService {
    async fn generate(
        &self,
        request: CompletionRequest,
        provider: &str,
    ) -> Result<GenerationResult, DomainError> {
        CompletionService::generate(self, request, provider).await
    }
}

#[async_trait::async_trait]
impl EmbeddingServiceTrait for EmbeddingService {
    async fn embed(
        &self,
        request: EmbeddingRequest,
        provider: &str,
    ) -> Result<EmbeddingResult, DomainError> {
        EmbeddingService::embed(self, request, provider).await
    }
}

#[async_trait::async_trait]
impl DocumentServiceTrait for DocumentService {
    async fn ingest(
        &self,
        documents: Vec<Document>,
        embedding_model: &str,
        provider: &str,
    ) -> Result<Vec<String>, DomainError> {
        DocumentService::ingest(self, documents, embedding_model, provider).await
    }

    async fn search(&self, search: DocumentSearch) -> Result<Vec<SearchResult>, DomainError> {
        DocumentService::search(self, search).await
    }

    async fn delete(&self, ids: &[String]) -> Result<(), DomainError> {
        DocumentService::delete(self, ids).await
    }
}

impl AppState {
    /// Wire the services around one registry and one vector store
    pub fn new(
        registry: Arc<ProviderRegistry>,
        vector_store: Arc<dyn VectorStore>,
        auth_provider: Arc<dyn AuthProvider>,
        ingest_concurrency: usize,
        environment: impl Into<String>,
    ) -> Self {
        let embedding_service = Arc::new(EmbeddingService::new(registry.clone()));
        let document_service = Arc::new(DocumentService::new(
            embedding_service.clone(),
            vector_store.clone(),
            ingest_concurrency,
        ));

        Self {
            completion_service: Arc::new(CompletionService::new(registry.clone())),
            embedding_service,
            document_service,
            auth_provider,
            registry,
            vector_store,
            environment: environment.into(),
        }
    }
}
