//! LM Studio provider (local inference server, no auth).

use async_trait::async_trait;

use super::post_chat_completion;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

pub struct LmStudioProvider {
    base_url: String,
    client: reqwest::Client,
}

impl LmStudioProvider {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionProvider for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, ProviderError> {
        post_chat_completion(&self.client, self.name(), &self.base_url, None, request).await
    }
}
