//! What adapters and the embedding dispatcher hand back

use serde::{Deserialize, Serialize};

use crate::domain::usage::UsageStats;

/// Raw vector plus canonical usage, as returned by a provider adapter
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEmbedding {
    pub vector: Vec<f32>,
    pub usage: UsageStats,
}

impl ProviderEmbedding {
    pub fn new(vector: Vec<f32>, usage: UsageStats) -> Self {
        Self { vector, usage }
    }
}

/// Canonical result of an embedding request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResult {
    #[serde(rename = "embedding")]
    pub vector: Vec<f32>,
    pub model: String,
    pub usage: UsageStats,
}

impl EmbeddingResult {
    pub fn new(vector: Vec<f32>, model: impl Into<String>, usage: UsageStats) -> Self {
        Self {
            vector,
            model: model.into(),
            usage,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// Cosine of the angle between `a` and `b`; 0 for empty, zero-norm or
/// differently sized vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let (dot, sq_a, sq_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, sq_a, sq_b), (x, y)| {
            (dot + x * y, sq_a + x * x, sq_b + y * y)
        });

    let denom = sq_a.sqrt() * sq_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}
