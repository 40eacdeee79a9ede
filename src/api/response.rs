//! API response payloads (after envelope unwrapping)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of `POST /v1/optimize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResult {
    /// The optimized text
    pub optimized: String,
    /// Tokens saved as reported by the backend
    #[serde(default)]
    pub tokens_saved: i64,
    /// Compression percentage
    #[serde(default)]
    pub compression: f64,
    /// Authoritative token count of the input, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_tokens: Option<u64>,
    /// Authoritative token count of the output, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_tokens: Option<u64>,
}

/// Result of `POST /v1/convert-to-toon`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeResult {
    /// Compact representation, treated as an opaque string
    pub toon: String,
    /// Input format the backend detected or was told
    #[serde(default)]
    pub format: String,
}

/// Result of `POST /v1/convert-from-toon`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResult {
    pub json: Value,
}

/// Result of `POST /v1/optimize-run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub final_answer: String,
    /// Backend-defined metrics, passed through untouched
    #[serde(default)]
    pub metrics: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optimize_result_camel_case() {
        let result: OptimizeResult = serde_json::from_value(json!({
            "optimized": "x",
            "tokensSaved": 5,
            "compression": 10,
            "originalTokens": 40
        }))
        .unwrap();
        assert_eq!(result.tokens_saved, 5);
        assert_eq!(result.compression, 10.0);
        assert_eq!(result.original_tokens, Some(40));
        assert_eq!(result.optimized_tokens, None);
    }

    #[test]
    fn test_run_result_without_debug() {
        let result: RunResult = serde_json::from_value(json!({
            "final_answer": "42",
            "metrics": { "total_tokens_used": 120 }
        }))
        .unwrap();
        assert_eq!(result.final_answer, "42");
        assert_eq!(result.metrics["total_tokens_used"], 120);
        assert!(result.debug.is_none());
    }
}
