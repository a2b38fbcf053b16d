//! Hosted OpenAI-compatible provider (OpenAI, OpenRouter, or any proxy that
//! accepts bearer-authenticated `/chat/completions` calls).

use async_trait::async_trait;

use super::post_chat_completion;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new hosted provider.
    ///
    /// # Arguments
    /// * `api_key` - Bearer token for the API
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::Config("API key is empty".to_string()));
        }
        post_chat_completion(
            &self.client,
            self.name(),
            &self.base_url,
            Some(&self.api_key),
            request,
        )
        .await
    }
}
