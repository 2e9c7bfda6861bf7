use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// The authenticated caller, as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: None,
            avatar_url: None,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

/// Third-party identity providers whose tokens can be exchanged for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalIdentityProvider {
    Google,
    LinkedIn,
}

impl ExternalIdentityProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for ExternalIdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExternalIdentityProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Self::Google),
            "linkedin" => Ok(Self::LinkedIn),
            other => Err(DomainError::authentication(format!(
                "Unsupported identity provider: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external_provider() {
        assert_eq!(
            "google".parse::<ExternalIdentityProvider>().unwrap(),
            ExternalIdentityProvider::Google
        );
        assert_eq!(
            "linkedin".parse::<ExternalIdentityProvider>().unwrap(),
            ExternalIdentityProvider::LinkedIn
        );
    }

    #[test]
    fn test_unknown_external_provider_is_authentication_error() {
        let err = "github".parse::<ExternalIdentityProvider>().unwrap_err();
        assert!(matches!(err, DomainError::Authentication { .. }));
    }

    #[test]
    fn test_principal_builder() {
        let principal = Principal::new("u-1", "ada@example.com").with_full_name("Ada");

        assert_eq!(principal.full_name.as_deref(), Some("Ada"));
        assert!(principal.avatar_url.is_none());
    }
}
