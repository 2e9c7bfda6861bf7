//! Embedding provider domain models and traits

mod provider;
mod request;
mod response;

pub use provider::EmbeddingProvider;
pub use request::{EmbeddingRequest, DEFAULT_EMBEDDING_MODEL};
pub use response::{cosine_similarity, EmbeddingResult, ProviderEmbedding};

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
