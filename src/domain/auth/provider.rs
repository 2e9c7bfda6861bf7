use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::{ExternalIdentityProvider, Principal};
use crate::domain::DomainError;

/// Identity provider capability
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync + Debug {
    /// Verify a bearer token and return the caller it belongs to
    async fn verify(&self, token: &str) -> Result<Principal, DomainError>;

    /// Exchange a third-party identity token for a session access token
    async fn exchange_external_token(
        &self,
        provider: ExternalIdentityProvider,
        token: &str,
    ) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
