//! Exact-match metadata filtering

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Metadata;

/// Conjunction of `field == value` conditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter(Metadata);

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// True when every listed field is present in `metadata` with an equal value
    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| metadata.get(field) == Some(expected))
    }
}

impl From<Metadata> for MetadataFilter {
    fn from(map: Metadata) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(MetadataFilter::new().matches(&Metadata::new()));
    }

    #[test]
    fn test_conjunction() {
        let filter = MetadataFilter::new().with("lang", "en").with("year", 2024);

        assert!(filter.matches(&metadata(json!({"lang": "en", "year": 2024, "x": 1}))));
        assert!(!filter.matches(&metadata(json!({"lang": "en", "year": 2023}))));
        assert!(!filter.matches(&metadata(json!({"lang": "en"}))));
    }

    #[test]
    fn test_exact_match_only() {
        let filter = MetadataFilter::new().with("lang", "en");

        assert!(!filter.matches(&metadata(json!({"lang": "en-US"}))));
        assert!(!filter.matches(&metadata(json!({"lang": ["en"]}))));
    }

    #[test]
    fn test_deserializes_from_plain_object() {
        let filter: MetadataFilter = serde_json::from_value(json!({"lang": "en"})).unwrap();
        assert_eq!(filter, MetadataFilter::new().with("lang", "en"));
    }
}
