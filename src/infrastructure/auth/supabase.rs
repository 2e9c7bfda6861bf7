//! Supabase GoTrue REST adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::domain::{AuthProvider, DomainError, ExternalIdentityProvider, Principal};
use crate::infrastructure::http_client::HttpClientTrait;

/// Verifies user tokens and exchanges third-party identity tokens through Supabase
#[derive(Debug)]
pub struct SupabaseAuthProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    service_key: String,
}

impl<C: HttpClientTrait> SupabaseAuthProvider<C> {
    pub fn new(client: C, base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    fn token_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=id_token", self.base_url)
    }

    /// Supabase names LinkedIn's OpenID Connect flavour differently
    fn supabase_provider_name(provider: ExternalIdentityProvider) -> &'static str {
        match provider {
            ExternalIdentityProvider::Google => "google",
            ExternalIdentityProvider::LinkedIn => "linkedin_oidc",
        }
    }
}

/// Build a principal from GoTrue's user object or equivalent JWT claims
pub(super) fn principal_from_user(
    id: String,
    email: Option<String>,
    user_metadata: Option<&Map<String, Value>>,
) -> Principal {
    let metadata_str = |key: &str| {
        user_metadata
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Principal {
        id,
        email: email.unwrap_or_default(),
        full_name: metadata_str("full_name"),
        avatar_url: metadata_str("avatar_url"),
    }
}

#[async_trait]
impl<C: HttpClientTrait> AuthProvider for SupabaseAuthProvider<C> {
    async fn verify(&self, token: &str) -> Result<Principal, DomainError> {
        let bearer = format!("Bearer {}", token);
        let headers = vec![
            ("apikey", self.service_key.as_str()),
            ("Authorization", bearer.as_str()),
        ];

        let response = self
            .client
            .get_json(&self.user_url(), headers)
            .await
            .map_err(|e| {
                DomainError::authentication(format!("Invalid authentication credentials: {}", e))
            })?;

        let user: SupabaseUser = serde_json::from_value(response).map_err(|e| {
            DomainError::authentication(format!("Unexpected user response: {}", e))
        })?;

        Ok(principal_from_user(
            user.id,
            user.email,
            user.user_metadata.as_ref(),
        ))
    }

    async fn exchange_external_token(
        &self,
        provider: ExternalIdentityProvider,
        token: &str,
    ) -> Result<String, DomainError> {
        let body = json!({
            "provider": Self::supabase_provider_name(provider),
            "id_token": token,
        });
        let headers = vec![
            ("apikey", self.service_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self
            .client
            .post_json(&self.token_url(), headers, &body)
            .await
            .map_err(|e| {
                DomainError::authentication(format!(
                    "Failed to authenticate with {}: {}",
                    provider, e
                ))
            })?;

        response
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::authentication(format!("Failed to authenticate with {}", provider))
            })
    }

    fn provider_name(&self) -> &'static str {
        "supabase"
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    email: Option<String>,
    user_metadata: Option<Map<String, Value>>,
}
