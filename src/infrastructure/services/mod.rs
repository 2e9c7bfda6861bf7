//! Application services - orchestrate providers and the vector store

mod completion_service;
mod document_service;
mod embedding_service;

pub use completion_service::CompletionService;
pub use document_service::{DocumentSearch, DocumentService};
pub use embedding_service::EmbeddingService;
