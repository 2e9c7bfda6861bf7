use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Free-form metadata attached to a document
pub type Metadata = Map<String, Value>;

/// Payload key holding the document body; metadata keys live beside it
pub const RESERVED_PAYLOAD_KEY: &str = "document";

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 100;

/// A caller-supplied document awaiting ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: Metadata,
}

/// Accepts an explicit `null` for metadata
fn null_as_empty<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Metadata>::deserialize(deserializer)?.unwrap_or_default())
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.is_empty() {
            return Err(DomainError::validation("document text must not be empty"));
        }
        if self.metadata.contains_key(RESERVED_PAYLOAD_KEY) {
            return Err(DomainError::validation(format!(
                "metadata key '{}' is reserved",
                RESERVED_PAYLOAD_KEY
            )));
        }
        Ok(())
    }

    /// Split into the stored payload, keeping this document's own metadata verbatim
    pub fn into_payload(self) -> RecordPayload {
        RecordPayload {
            document: DocumentBody {
                text: self.text,
                title: self.title,
            },
            metadata: self.metadata,
        }
    }
}

/// The text portion of a stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBody {
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// What the vector store keeps next to each vector
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPayload {
    pub document: DocumentBody,
    pub metadata: Metadata,
}

impl RecordPayload {
    /// Flatten to the stored JSON shape: `{"document": {...}, ...metadata}`
    pub fn to_json(&self) -> Value {
        let mut object = self.metadata.clone();
        let mut body = Map::new();
        body.insert("text".into(), Value::String(self.document.text.clone()));
        body.insert(
            "title".into(),
            self.document
                .title
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        object.insert(RESERVED_PAYLOAD_KEY.into(), Value::Object(body));
        Value::Object(object)
    }

    /// Inverse of [`RecordPayload::to_json`]; keys other than `document` become metadata
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        let Value::Object(mut object) = value else {
            return Err(DomainError::storage("record payload is not a JSON object"));
        };

        let document = match object.remove(RESERVED_PAYLOAD_KEY) {
            Some(body) => serde_json::from_value(body)
                .map_err(|e| DomainError::storage(format!("invalid document payload: {}", e)))?,
            None => DocumentBody {
                text: String::new(),
                title: None,
            },
        };

        Ok(Self {
            document,
            metadata: object,
        })
    }
}

/// One (vector, payload) pair handed to the store for writing
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub vector: Vec<f32>,
    pub payload: RecordPayload,
}

impl VectorRecord {
    pub fn new(vector: Vec<f32>, payload: RecordPayload) -> Self {
        Self { vector, payload }
    }
}

/// A nearest-neighbour hit as reported by the store
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub id: String,
    pub score: f32,
    pub payload: RecordPayload,
}

/// Canonical search hit returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub score: f32,
    pub document: Map<String, Value>,
    pub metadata: Metadata,
}

impl From<ScoredRecord> for SearchResult {
    fn from(record: ScoredRecord) -> Self {
        let mut document = Map::new();
        document.insert("text".into(), Value::String(record.payload.document.text));
        // `title` is always present, null when absent.
        document.insert(
            "title".into(),
            record.payload.document.title.map_or(Value::Null, Value::String),
        );

        Self {
            id: record.id,
            score: record.score,
            document,
            metadata: record.payload.metadata,
        }
    }
}
