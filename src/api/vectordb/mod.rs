//! Vector database endpoints: add, search and delete documents

use axum::{extract::State, http::StatusCode, routing::post, Router};
use tracing::info;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DeleteDocumentsRequest, DocumentInput, DocumentUploadResponse, Json, SearchQuery,
};
use crate::domain::SearchResult;

pub fn create_vectordb_router() -> Router<AppState> {
    Router::new()
        .route("/documents", post(add_documents).delete(delete_documents))
        .route("/search", post(search_documents))
}

/// POST /api/vectordb/documents
pub async fn add_documents(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(input): Json<DocumentInput>,
) -> Result<Json<DocumentUploadResponse>, ApiError> {
    info!(
        user_id = %user.id,
        count = input.documents.len(),
        provider = %input.provider,
        model = %input.embedding_model,
        "Adding documents"
    );

    let document_ids = state
        .document_service
        .ingest(input.documents, &input.embedding_model, &input.provider)
        .await?;

    Ok(Json(DocumentUploadResponse { document_ids }))
}

/// POST /api/vectordb/search
pub async fn search_documents(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(query): Json<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    info!(user_id = %user.id, limit = query.limit, "Searching documents");

    let results = state.document_service.search(query.into()).await?;
    Ok(Json(results))
}

/// DELETE /api/vectordb/documents
pub async fn delete_documents(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<DeleteDocumentsRequest>,
) -> Result<StatusCode, ApiError> {
    info!(user_id = %user.id, count = request.document_ids.len(), "Deleting documents");

    state.document_service.delete(&request.document_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
