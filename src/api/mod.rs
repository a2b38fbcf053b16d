//! # Writing API
//!
//! HTTP surface for the Generation Gateway, plus a client that lets the
//! terminal front-end use a remote server as its [`WritingBackend`].
//!
//! ```text
//! POST /api/generateWriting   { prompt }                                  → { generatedText }
//! POST /api/continueWriting   { originalPrompt, originalGeneratedText }   → { generatedText }
//! GET  /health                                                            → { status, version }
//! ```
//!
//! [`WritingBackend`]: crate::gateway::WritingBackend

pub mod client;
pub mod server;

use serde::{Deserialize, Serialize};

pub use client::ApiClient;
pub use server::{ApiError, ServerState, router, serve};

pub const GENERATE_PATH: &str = "/api/generateWriting";
pub const CONTINUE_PATH: &str = "/api/continueWriting";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateWritingRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinueWritingRequest {
    #[serde(rename = "originalPrompt", alias = "ogPrompt")]
    pub original_prompt: String,
    #[serde(rename = "originalGeneratedText", alias = "ogGeneratedText", default)]
    pub original_generated_text: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedTextResponse {
    #[serde(rename = "generatedText")]
    pub generated_text: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn continue_request_accepts_short_field_names() {
        let body = json!({ "ogPrompt": "p", "ogGeneratedText": ["a", "b"] });
        let request: ContinueWritingRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.original_prompt, "p");
        assert_eq!(request.original_generated_text, vec!["a", "b"]);
    }

    #[test]
    fn continue_request_serializes_long_field_names() {
        let request = ContinueWritingRequest {
            original_prompt: "p".to_string(),
            original_generated_text: vec!["a".to_string()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "originalPrompt": "p", "originalGeneratedText": ["a"] })
        );
    }

    #[test]
    fn continue_request_without_prior_text_is_empty() {
        let request: ContinueWritingRequest =
            serde_json::from_value(json!({ "originalPrompt": "p" })).unwrap();
        assert!(request.original_generated_text.is_empty());
    }

    #[test]
    fn generated_text_uses_camel_case() {
        let response = GeneratedTextResponse {
            generated_text: vec!["One.".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "generatedText": ["One."] })
        );
    }
}
