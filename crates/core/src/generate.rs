// crates/core/src/generate.rs
//! Text generation: request/response shapes and the `TextGenerator` seam.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GenerateError;

/// Text returned when generation fails on the synchronous path.
pub const FALLBACK_RESPONSE: &str = "We could not process your request. Please try again.";

/// Request body for POST /generate and POST /generate/async.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        Ok(())
    }
}

/// Generation result. Also the payload stored on a finished async job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub model: String,
    pub structured: Map<String, Value>,
    pub latency_ms: u64,
}

impl GenerateResponse {
    /// Degraded-but-valid payload returned instead of an error.
    pub fn fallback() -> Self {
        Self {
            response: FALLBACK_RESPONSE.to_string(),
            confidence: 0.2,
            model: "fallback".to_string(),
            structured: structured("fallback", "general"),
            latency_ms: 0,
        }
    }
}

fn structured(summary: &str, intent: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("summary".to_string(), Value::String(summary.to_string()));
    map.insert("intent".to_string(), Value::String(intent.to_string()));
    map
}

/// Trait for text generators.
///
/// Implementations include:
/// - `LocalGenerator` - template response, no model required
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, GenerateError>;

    /// Model identifier reported in responses and logs.
    fn model(&self) -> &str;
}

/// Template-based generator used when no model is configured.
#[derive(Debug, Clone, Default)]
pub struct LocalGenerator;

impl LocalGenerator {
    pub const MODEL: &'static str = "local-fallback";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerator for LocalGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, GenerateError> {
        let start = Instant::now();
        let content = prompt.trim();
        let response = format!(
            "I can help with your request: {content}. \
             Please share location, budget, and property type for better results."
        );

        Ok(GenerateResponse {
            response,
            confidence: 0.72,
            model: Self::MODEL.to_string(),
            structured: structured("Property assistance response", "property_search"),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn model(&self) -> &str {
        Self::MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_local_generator_template() {
        let result = LocalGenerator::new().generate("  2BHK near metro  ").await.unwrap();

        assert_eq!(
            result.response,
            "I can help with your request: 2BHK near metro. \
             Please share location, budget, and property type for better results."
        );
        assert_eq!(result.confidence, 0.72);
        assert_eq!(result.model, "local-fallback");
        assert_eq!(result.structured["intent"], "property_search");
        assert_eq!(result.structured["summary"], "Property assistance response");
    }

    #[test]
    fn test_fallback_payload() {
        let fallback = GenerateResponse::fallback();
        assert_eq!(fallback.response, FALLBACK_RESPONSE);
        assert_eq!(fallback.confidence, 0.2);
        assert_eq!(fallback.model, "fallback");
        assert_eq!(fallback.structured["summary"], "fallback");
        assert_eq!(fallback.structured["intent"], "general");
        assert_eq!(fallback.latency_ms, 0);
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let request = GenerateRequest { prompt: String::new(), metadata: None };
        assert!(matches!(request.validate(), Err(GenerateError::EmptyPrompt)));

        let request: GenerateRequest = serde_json::from_str(r#"{"prompt":"Hello"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.metadata.is_none());
    }

    #[test]
    fn test_response_wire_shape() {
        let json = serde_json::to_value(GenerateResponse::fallback()).unwrap();
        for field in ["response", "confidence", "model", "structured", "latency_ms"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
