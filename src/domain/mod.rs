//! Domain layer - canonical types, capability traits and errors

pub mod auth;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod provider;
pub mod usage;

pub use auth::{AuthProvider, ExternalIdentityProvider, Principal};
pub use document::{
    Document, DocumentBody, Metadata, MetadataFilter, RecordPayload, ScoredRecord, SearchResult,
    VectorRecord, VectorStore,
};
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResult, ProviderEmbedding};
pub use error::DomainError;
pub use llm::{CompletionProvider, CompletionRequest, GenerationResult, ProviderCompletion};
pub use provider::ProviderName;
pub use usage::UsageStats;
