//! Document domain - records held by the vector store and search results

mod entity;
mod filter;
mod store;

pub use entity::{
    Document, DocumentBody, Metadata, RecordPayload, ScoredRecord, SearchResult, VectorRecord,
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, RESERVED_PAYLOAD_KEY,
};
pub use filter::MetadataFilter;
pub use store::VectorStore;

#[cfg(test)]
pub use store::mock::MockVectorStore;
