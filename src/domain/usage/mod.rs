//! Canonical usage accounting shared by every provider

use serde::{Deserialize, Serialize};

/// Token usage statistics in the gateway's canonical shape.
///
/// Providers name these fields differently (`input/output tokens` vs.
/// `prompt/completion tokens`) and do not all report a total, so the total
/// is always computed here rather than copied from the vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(rename = "prompt_tokens")]
    pub prompt_units: u32,
    #[serde(rename = "completion_tokens")]
    pub completion_units: u32,
    #[serde(rename = "total_tokens")]
    pub total_units: u32,
}

impl UsageStats {
    pub fn new(prompt_units: u32, completion_units: u32) -> Self {
        Self {
            prompt_units,
            completion_units,
            total_units: prompt_units.saturating_add(completion_units),
        }
    }

    /// Usage for requests that only consume input (embeddings)
    pub fn prompt_only(prompt_units: u32) -> Self {
        Self::new(prompt_units, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_total_is_computed() {
        let usage = UsageStats::new(3, 1);
        assert_eq!(usage.total_units, 4);
    }

    #[test]
    fn test_prompt_only_usage() {
        let usage = UsageStats::prompt_only(12);
        assert_eq!(usage.completion_units, 0);
        assert_eq!(usage.total_units, 12);
    }

    #[test]
    fn test_usage_serializes_with_token_names() {
        let json = serde_json::to_value(UsageStats::new(10, 20)).unwrap();

        assert_eq!(json["prompt_tokens"], 10);
        assert_eq!(json["completion_tokens"], 20);
        assert_eq!(json["total_tokens"], 30);
    }
}
