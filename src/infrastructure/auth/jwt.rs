//! Local JWT verification for tokens signed with the project's shared secret

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::sync::Arc;

use super::supabase::principal_from_user;
use crate::domain::{AuthProvider, DomainError, ExternalIdentityProvider, Principal};

/// JWT claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
    #[serde(default)]
    pub user_metadata: Option<Map<String, Value>>,
}

/// Verifies HS256 tokens locally; token exchange still goes to the hosted provider
pub struct JwtAuthProvider {
    decoding_key: DecodingKey,
    validation: Validation,
    exchange: Arc<dyn AuthProvider>,
}

impl Debug for JwtAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthProvider")
            .field("decoding_key", &"[hidden]")
            .field("exchange", &self.exchange.provider_name())
            .finish()
    }
}

impl JwtAuthProvider {
    pub fn new(secret: impl AsRef<[u8]>, exchange: Arc<dyn AuthProvider>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Audience varies per project; signature and expiry are what matter here.
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
            exchange,
        }
    }

    pub fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::authentication(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn verify(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self.validate(token)?;

        Ok(principal_from_user(
            claims.sub,
            claims.email,
            claims.user_metadata.as_ref(),
        ))
    }

    async fn exchange_external_token(
        &self,
        provider: ExternalIdentityProvider,
        token: &str,
    ) -> Result<String, DomainError> {
        self.exchange.exchange_external_token(provider, token).await
    }

    fn provider_name(&self) -> &'static str {
        "jwt"
    }
}
