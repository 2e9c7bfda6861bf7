//! Embedding request types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Request to embed a single text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub text: String,
    pub model: String,
}

impl EmbeddingRequest {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.is_empty() {
            return Err(DomainError::validation("text must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(DomainError::validation("model must not be empty"));
        }
        Ok(())
    }
}
