use async_trait::async_trait;
use std::fmt::Debug;

use super::{MetadataFilter, ScoredRecord, VectorRecord};
use crate::domain::DomainError;

/// Vector database capability
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Get the store type name
    fn store_type(&self) -> &'static str;

    /// Name of the collection this store writes to
    fn collection(&self) -> &str;

    /// Create the collection with the given dimensionality if it does not exist yet
    async fn ensure_collection(&self, dimension: usize) -> Result<(), DomainError>;

    /// Write records; returns one generated id per record, in input order
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<Vec<String>, DomainError>;

    /// Nearest neighbours by cosine similarity, best first
    async fn query(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<ScoredRecord>, DomainError>;

    /// Remove records by id
    async fn delete(&self, ids: &[String]) -> Result<(), DomainError>;

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;
}
