//! Qdrant vector store over its REST API

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::document::{
    MetadataFilter, RecordPayload, ScoredRecord, VectorRecord, VectorStore,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::{HttpClientTrait, HttpError};

/// Qdrant collection client; one instance per collection
#[derive(Debug)]
pub struct QdrantVectorStore<C: HttpClientTrait> {
    client: C,
    base_url: String,
    collection: String,
    api_key: Option<String>,
    /// Set once the collection is known to exist
    collection_ready: AtomicBool,
}

impl<C: HttpClientTrait> QdrantVectorStore<C> {
    pub fn new(client: C, base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            api_key: None,
            collection_ready: AtomicBool::new(false),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref api_key) = self.api_key {
            headers.push(("api-key", api_key.as_str()));
        }
        headers
    }

    fn build_filter(filter: &MetadataFilter) -> Value {
        let must: Vec<Value> = filter
            .conditions()
            .map(|(key, value)| json!({"key": key, "match": {"value": value}}))
            .collect();

        json!({ "must": must })
    }

    fn storage_error(operation: &str, error: HttpError) -> DomainError {
        DomainError::storage(format!("Failed to {}: {}", operation, error))
    }

    fn storage_write_error(operation: &str, error: HttpError) -> DomainError {
        DomainError::storage_write(format!("Failed to {}: {}", operation, error))
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorStore for QdrantVectorStore<C> {
    fn store_type(&self) -> &'static str {
        "qdrant"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn ensure_collection(&self, dimension: usize) -> Result<(), DomainError> {
        if self.collection_ready.load(Ordering::Acquire) {
            return Ok(());
        }

        let url = self.collection_url();
        match self.client.get_json(&url, self.headers()).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                tracing::info!(collection = %self.collection, dimension, "Creating Qdrant collection");

                let body = json!({"vectors": {"size": dimension, "distance": "Cosine"}});
                match self.client.put_json(&url, self.headers(), &body).await {
                    Ok(_) => {}
                    // Lost a creation race with another writer.
                    Err(e) if e.status() == Some(409) => {}
                    Err(e) => return Err(Self::storage_error("create collection", e)),
                }
            }
            Err(e) => return Err(Self::storage_error("read collection", e)),
        }

        self.collection_ready.store(true, Ordering::Release);
        Ok(())
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<Vec<String>, DomainError> {
        let ids: Vec<String> = records.iter().map(|_| Uuid::new_v4().to_string()).collect();

        let points: Vec<Value> = records
            .iter()
            .zip(&ids)
            .map(|(record, id)| {
                json!({
                    "id": id,
                    "vector": record.vector,
                    "payload": record.payload.to_json(),
                })
            })
            .collect();

        let url = format!("{}/points?wait=true", self.collection_url());
        self.client
            .put_json(&url, self.headers(), &json!({ "points": points }))
            .await
            .map_err(|e| Self::storage_write_error("upsert points", e))?;

        tracing::debug!(collection = %self.collection, count = ids.len(), "Upserted points");
        Ok(ids)
    }

    async fn query(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<ScoredRecord>, DomainError> {
        let mut body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });

        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            body["filter"] = Self::build_filter(filter);
        }

        let url = format!("{}/points/search", self.collection_url());
        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| Self::storage_error("search points", e))?;

        let response: QdrantSearchResponse = serde_json::from_value(response)
            .map_err(|e| DomainError::storage(format!("Invalid search response: {}", e)))?;

        response
            .result
            .into_iter()
            .map(|point| {
                Ok(ScoredRecord {
                    id: point_id_to_string(point.id),
                    score: point.score,
                    payload: RecordPayload::from_json(point.payload.unwrap_or(Value::Object(
                        serde_json::Map::new(),
                    )))?,
                })
            })
            .collect()
    }

    async fn delete(&self, ids: &[String]) -> Result<(), DomainError> {
        let url = format!("{}/points/delete?wait=true", self.collection_url());
        self.client
            .post_json(&url, self.headers(), &json!({ "points": ids }))
            .await
            .map_err(|e| Self::storage_write_error("delete points", e))?;

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        let url = format!("{}/collections", self.base_url);
        match self.client.get_json(&url, self.headers()).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(error = %e, "Qdrant health check failed");
                Ok(false)
            }
        }
    }
}

/// Qdrant ids are either UUID strings or unsigned integers
fn point_id_to_string(id: Value) -> String {
    match id {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct QdrantSearchResponse {
    #[serde(default)]
    result: Vec<QdrantScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct QdrantScoredPoint {
    id: Value,
    score: f32,
    payload: Option<Value>,
}
