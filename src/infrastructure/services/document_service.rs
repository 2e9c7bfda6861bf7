//! Document ingestion and semantic search over the vector store

use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::EmbeddingService;
use crate::domain::document::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::domain::{
    Document, DomainError, EmbeddingRequest, EmbeddingResult, MetadataFilter, SearchResult,
    VectorRecord, VectorStore,
};

/// A semantic search over stored documents
#[derive(Debug, Clone)]
pub struct DocumentSearch {
    pub query: String,
    pub embedding_model: String,
    pub provider: String,
    pub limit: usize,
    pub filter: Option<MetadataFilter>,
}

impl DocumentSearch {
    pub fn new(
        query: impl Into<String>,
        embedding_model: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            embedding_model: embedding_model.into(),
            provider: provider.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            filter: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = (!filter.is_empty()).then_some(filter);
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.query.is_empty() {
            return Err(DomainError::validation("query must not be empty"));
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&self.limit) {
            return Err(DomainError::validation(format!(
                "limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }
        Ok(())
    }
}

/// Orchestrates embedding and the vector store for document operations
#[derive(Debug, Clone)]
pub struct DocumentService {
    embeddings: Arc<EmbeddingService>,
    store: Arc<dyn VectorStore>,
    ingest_concurrency: usize,
}

impl DocumentService {
    pub fn new(
        embeddings: Arc<EmbeddingService>,
        store: Arc<dyn VectorStore>,
        ingest_concurrency: usize,
    ) -> Self {
        Self {
            embeddings,
            store,
            ingest_concurrency: ingest_concurrency.max(1),
        }
    }

    /// Embed every document and write them in one batch.
    ///
    /// Nothing is written unless every embedding succeeds. Returned ids are in
    /// input order.
    pub async fn ingest(
        &self,
        documents: Vec<Document>,
        embedding_model: &str,
        provider: &str,
    ) -> Result<Vec<String>, DomainError> {
        if documents.is_empty() {
            return Err(DomainError::validation("documents must not be empty"));
        }
        for document in &documents {
            document.validate()?;
        }

        let requests: Vec<EmbeddingRequest> = documents
            .iter()
            .map(|document| EmbeddingRequest::new(document.text.clone(), embedding_model))
            .collect();
        let provider = provider.to_owned();

        // Each future owns its inputs; `buffered` yields in input order.
        let embeddings: Vec<EmbeddingResult> = stream::iter(requests.into_iter().map(|request| {
            let embeddings = Arc::clone(&self.embeddings);
            let provider = provider.clone();
            async move { embeddings.embed(request, &provider).await }
        }))
        .buffered(self.ingest_concurrency)
        .try_collect()
        .await?;

        let dimension = uniform_dimension(&embeddings)?;
        self.store.ensure_collection(dimension).await?;

        let records: Vec<VectorRecord> = embeddings
            .into_iter()
            .zip(documents)
            .map(|(embedding, document)| VectorRecord::new(embedding.vector, document.into_payload()))
            .collect();
        let expected = records.len();

        let ids = self.store.upsert(records).await?;
        if ids.len() != expected {
            return Err(DomainError::storage_write(format!(
                "store acknowledged {} of {} records",
                ids.len(),
                expected
            )));
        }

        info!(
            collection = self.store.collection(),
            count = ids.len(),
            dimension,
            "Ingested documents"
        );
        Ok(ids)
    }

    /// Nearest documents to the query, best first
    pub async fn search(&self, search: DocumentSearch) -> Result<Vec<SearchResult>, DomainError> {
        search.validate()?;

        let embedding = self
            .embeddings
            .embed(
                EmbeddingRequest::new(search.query.as_str(), search.embedding_model.as_str()),
                &search.provider,
            )
            .await?;

        self.store.ensure_collection(embedding.dimensions()).await?;

        let mut hits = self
            .store
            .query(&embedding.vector, search.limit, search.filter.as_ref())
            .await?;

        if let Some(filter) = &search.filter {
            hits.retain(|hit| filter.matches(&hit.payload.metadata));
        }
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(search.limit);

        debug!(
            collection = self.store.collection(),
            hits = hits.len(),
            "Search completed"
        );
        Ok(hits.into_iter().map(SearchResult::from).collect())
    }

    pub async fn delete(&self, ids: &[String]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Err(DomainError::validation("ids must not be empty"));
        }

        self.store.delete(ids).await?;

        info!(collection = self.store.collection(), count = ids.len(), "Deleted documents");
        Ok(())
    }
}

fn uniform_dimension(embeddings: &[EmbeddingResult]) -> Result<usize, DomainError> {
    let dimension = embeddings.first().map(EmbeddingResult::dimensions).unwrap_or(0);

    if dimension == 0 {
        return Err(DomainError::validation("embeddings must not be empty"));
    }
    if embeddings.iter().any(|e| e.dimensions() != dimension) {
        return Err(DomainError::validation(
            "embeddings in one ingestion must share a dimension",
        ));
    }
    Ok(dimension)
}
