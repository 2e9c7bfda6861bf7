//! Vector database request and response bodies

use serde::{Deserialize, Serialize};

use super::llm::{default_embedding_model, default_provider};
use crate::domain::document::DEFAULT_SEARCH_LIMIT;
use crate::domain::{Document, Metadata, MetadataFilter};
use crate::infrastructure::services::DocumentSearch;

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// POST /api/vectordb/documents
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInput {
    pub documents: Vec<Document>,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_provider")]
    pub provider: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentUploadResponse {
    pub document_ids: Vec<String>,
}

/// POST /api/vectordb/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query_text: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub filter_metadata: Option<Metadata>,
}

impl From<SearchQuery> for DocumentSearch {
    fn from(query: SearchQuery) -> Self {
        let search = DocumentSearch::new(query.query_text, query.embedding_model, query.provider)
            .with_limit(query.limit);

        match query.filter_metadata {
            Some(filter) => search.with_filter(MetadataFilter::from(filter)),
            None => search,
        }
    }
}

/// DELETE /api/vectordb/documents
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteDocumentsRequest {
    pub document_ids: Vec<String>,
}
