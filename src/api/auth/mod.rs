//! Authentication endpoints
//!
//! Profile lookup for the bearer token, and exchange of an external identity
//! provider's token for a gateway access token.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{ExternalIdentityProvider, Principal};

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/provider-token", post(exchange_provider_token))
}

/// Profile of the authenticated user
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<Principal> for UserProfile {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            email: principal.email,
            full_name: principal.full_name,
            avatar_url: principal.avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderTokenParams {
    pub provider: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// GET /api/auth/me
pub async fn get_current_user(RequireUser(principal): RequireUser) -> Json<UserProfile> {
    Json(UserProfile::from(principal))
}

/// POST /api/auth/provider-token?provider=google&token=...
///
/// No bearer token required; an unknown provider fails before any network call.
pub async fn exchange_provider_token(
    State(state): State<AppState>,
    Query(params): Query<ProviderTokenParams>,
) -> Result<Json<TokenResponse>, ApiError> {
    let provider: ExternalIdentityProvider = params.provider.parse()?;

    let access_token = state
        .auth_provider
        .exchange_external_token(provider, &params.token)
        .await?;

    info!(provider = %provider, "Exchanged external identity token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
