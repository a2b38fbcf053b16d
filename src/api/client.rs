use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;

use super::{
    CONTINUE_PATH, ContinueWritingRequest, ErrorResponse, GENERATE_PATH, GenerateWritingRequest,
    GeneratedTextResponse,
};
use crate::gateway::{GenerationError, WritingBackend};

/// Talks to a running `quill serve` instance.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<String>, GenerationError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Prefer the server's own message when the body is our error shape
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            warn!("{} returned {}: {}", url, status, message);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeneratedTextResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        Ok(parsed.generated_text)
    }
}

#[async_trait]
impl WritingBackend for ApiClient {
    fn label(&self) -> String {
        self.base_url.clone()
    }

    async fn generate(&self, prompt: &str) -> Result<Vec<String>, GenerationError> {
        let body = GenerateWritingRequest {
            prompt: prompt.to_string(),
        };
        self.post(GENERATE_PATH, &body).await
    }

    async fn continue_writing(
        &self,
        original_prompt: &str,
        prior_paragraphs: &[String],
    ) -> Result<Vec<String>, GenerationError> {
        let body = ContinueWritingRequest {
            original_prompt: original_prompt.to_string(),
            original_generated_text: prior_paragraphs.to_vec(),
        };
        self.post(CONTINUE_PATH, &body).await
    }
}
