//! Request/response types for the HTTP surface

pub mod documents;
pub mod error;
pub mod json;
pub mod llm;

pub use documents::{DeleteDocumentsRequest, DocumentInput, DocumentUploadResponse, SearchQuery};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use llm::{CreateEmbeddingRequest, TextGenerationRequest};
