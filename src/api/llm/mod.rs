//! Text generation and embedding endpoints

use axum::{extract::State, routing::post, Router};
use tracing::{debug, info};

use crate::api::middleware::{truncate_for_log, RequireUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, CreateEmbeddingRequest, Json, TextGenerationRequest};
use crate::domain::{EmbeddingResult, GenerationResult};

const PROMPT_LOG_CHARS: usize = 64;

pub fn create_llm_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_text))
        .route("/embedding", post(create_embedding))
}

/// POST /api/llm/generate
pub async fn generate_text(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<TextGenerationRequest>,
) -> Result<Json<GenerationResult>, ApiError> {
    let (request, provider) = body.into_parts();

    info!(user_id = %user.id, provider = %provider, model = %request.model, "Generating text");
    debug!(prompt = %truncate_for_log(&request.prompt, PROMPT_LOG_CHARS), "Prompt");

    let result = state.completion_service.generate(request, &provider).await?;
    Ok(Json(result))
}

/// POST /api/llm/embedding
pub async fn create_embedding(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<CreateEmbeddingRequest>,
) -> Result<Json<EmbeddingResult>, ApiError> {
    let (request, provider) = body.into_parts();

    info!(user_id = %user.id, provider = %provider, model = %request.model, "Creating embedding");

    let result = state.embedding_service.embed(request, &provider).await?;
    Ok(Json(result))
}
