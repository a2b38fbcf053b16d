//! Chat-completions providers.
//!
//! Both providers speak the OpenAI `/chat/completions` dialect; they differ in
//! default base URL and authentication. The wire types and the request/response
//! cycle live here so each provider file only carries its own setup.

mod lmstudio;
mod openai;

pub use lmstudio::{DEFAULT_LMSTUDIO_BASE_URL, LmStudioProvider};
pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAiProvider};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{ChatMessage, CompletionRequest, ProviderError};

// ============================================================================
// Chat Completions API Types
// ============================================================================

/// The request body for `/chat/completions`.
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Request/Response Cycle
// ============================================================================

/// Posts one chat completion and extracts the first choice's content.
///
/// `provider` only labels log lines. `api_key` is sent as a bearer token when present.
async fn post_chat_completion(
    client: &reqwest::Client,
    provider: &str,
    base_url: &str,
    api_key: Option<&str>,
    request: CompletionRequest<'_>,
) -> Result<Option<String>, ProviderError> {
    let body = ChatCompletionRequest {
        model: request.model,
        messages: request.messages,
        max_tokens: request.max_output_tokens,
    };

    info!(
        "{} chat completion request: model={}, message_count={}, max_tokens={}",
        provider,
        body.model,
        body.messages.len(),
        body.max_tokens
    );

    let mut builder = client
        .post(format!("{}/chat/completions", base_url.trim_end_matches('/')))
        .json(&body);
    if let Some(key) = api_key {
        builder = builder.bearer_auth(key);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    debug!("{} response status: {}", provider, response.status());

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let err_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("{} API error: {} - {}", provider, status, err_body);
        return Err(ProviderError::Api {
            status,
            message: err_body,
        });
    }

    let parsed: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::Parse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content);

    match &content {
        Some(text) => info!("{} completion received: {} bytes", provider, text.len()),
        None => warn!("{} completion returned no content", provider),
    }

    Ok(content)
}
