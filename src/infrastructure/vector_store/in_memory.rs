//! In-memory vector store for development and testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::document::{
    MetadataFilter, RecordPayload, ScoredRecord, VectorRecord, VectorStore,
};
use crate::domain::embedding::cosine_similarity;
use crate::domain::DomainError;

/// In-process store used when no vector database URL is configured
#[derive(Debug)]
pub struct InMemoryVectorStore {
    collection: String,
    state: Arc<RwLock<CollectionState>>,
}

#[derive(Debug, Default)]
struct CollectionState {
    /// `None` until the collection is created
    dimension: Option<usize>,
    records: Vec<StoredRecord>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    vector: Vec<f32>,
    payload: RecordPayload,
}

impl InMemoryVectorStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            state: Arc::new(RwLock::new(CollectionState::default())),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn dimension(&self) -> Option<usize> {
        self.state.read().await.dimension
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn store_type(&self) -> &'static str {
        "in_memory"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn ensure_collection(&self, dimension: usize) -> Result<(), DomainError> {
        if dimension == 0 {
            return Err(DomainError::storage("collection dimension must be positive"));
        }

        let mut state = self.state.write().await;
        if state.dimension.is_none() {
            tracing::info!(collection = %self.collection, dimension, "Creating in-memory collection");
            state.dimension = Some(dimension);
        }
        Ok(())
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<Vec<String>, DomainError> {
        let mut state = self.state.write().await;

        let dimension = state.dimension.ok_or_else(|| {
            DomainError::storage_write(format!("collection '{}' does not exist", self.collection))
        })?;

        // Validate the whole batch before touching the records.
        if let Some(bad) = records.iter().find(|r| r.vector.len() != dimension) {
            return Err(DomainError::storage_write(format!(
                "vector dimension {} does not match collection dimension {}",
                bad.vector.len(),
                dimension
            )));
        }

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let id = Uuid::new_v4().to_string();
            ids.push(id.clone());
            state.records.push(StoredRecord {
                id,
                vector: record.vector,
                payload: record.payload,
            });
        }

        Ok(ids)
    }

    async fn query(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<ScoredRecord>, DomainError> {
        let state = self.state.read().await;

        if let Some(dimension) = state.dimension.filter(|d| *d != vector.len()) {
            return Err(DomainError::storage(format!(
                "query dimension {} does not match collection dimension {}",
                vector.len(),
                dimension
            )));
        }

        let mut hits: Vec<ScoredRecord> = state
            .records
            .iter()
            .filter(|record| filter.is_none_or(|f| f.matches(&record.payload.metadata)))
            .map(|record| ScoredRecord {
                id: record.id.clone(),
                score: cosine_similarity(vector, &record.vector),
                payload: record.payload.clone(),
            })
            .collect();

        // Stable: equal scores keep insertion order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);

        Ok(hits)
    }

    async fn delete(&self, ids: &[String]) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.records.retain(|record| !ids.contains(&record.id));
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
