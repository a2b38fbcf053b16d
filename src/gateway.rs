//! # Generation Gateway
//!
//! Turns a prompt into an ordered list of paragraphs by calling a chat-completion
//! provider. The gateway is stateless: the provider handle, model, system prompt
//! and token budget are injected at construction and every call is independent.
//!
//! ```text
//! generate(prompt)                   continue_writing(prompt, prior)
//!   [system, user(prompt)]             [system, user(prompt),
//!            │                          assistant(prior), user(continue)]
//!            └──────────────┬──────────────────┘
//!                           ▼
//!                CompletionProvider::complete
//!                           ▼
//!          split on "\n\n", drop blank fragments
//! ```
//!
//! Merging a continuation onto earlier output is the controller's job
//! (see [`crate::core::merge`]); the gateway only returns the new paragraphs.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::inference::{
    ChatMessage, CompletionProvider, CompletionRequest, LmStudioProvider, OpenAiProvider,
    ProviderError,
};

/// Sole paragraph returned when the provider answers without any content.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated.";

/// Final user turn of a continuation request.
pub const CONTINUE_INSTRUCTION: &str = "Continue writing from exactly where the text above stops, \
    in the same voice. Reply with only the new text. Do not repeat or summarize what came before.";

// ============================================================================
// Requests and Errors
// ============================================================================

/// One unit of work for a [`WritingBackend`]. Built per call, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    /// Fresh generation from a prompt.
    Generate { prompt: String },
    /// Continuation of earlier output for the same prompt.
    Continue {
        original_prompt: String,
        prior_paragraphs: Vec<String>,
    },
}

impl GenerationRequest {
    pub fn is_continuation(&self) -> bool {
        matches!(self, GenerationRequest::Continue { .. })
    }
}

/// A generation attempt that produced no usable result.
#[derive(Debug)]
pub enum GenerationError {
    /// The completion provider failed.
    Provider(ProviderError),
    /// The writing API could not be reached.
    Transport(String),
    /// The writing API answered with a non-success status.
    Status { status: u16, message: String },
    /// The writing API answered with a body we could not decode.
    Decode(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Provider(e) => write!(f, "generation failed: {e}"),
            GenerationError::Transport(msg) => write!(f, "generation failed: {msg}"),
            GenerationError::Status { status, message } => {
                write!(f, "generation failed (HTTP {status}): {message}")
            }
            GenerationError::Decode(msg) => {
                write!(f, "generation failed: unreadable response: {msg}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<ProviderError> for GenerationError {
    fn from(e: ProviderError) -> Self {
        GenerationError::Provider(e)
    }
}

// ============================================================================
// Backend Seam
// ============================================================================

/// Anything that can produce paragraphs for the writing workflow: the in-process
/// [`Gateway`] or a remote writing API ([`crate::api::ApiClient`]).
#[async_trait]
pub trait WritingBackend: Send + Sync {
    /// Short label for the status bar (e.g. the model or server URL).
    fn label(&self) -> String;

    async fn generate(&self, prompt: &str) -> Result<Vec<String>, GenerationError>;

    /// Returns only the new paragraphs that follow `prior_paragraphs`.
    async fn continue_writing(
        &self,
        original_prompt: &str,
        prior_paragraphs: &[String],
    ) -> Result<Vec<String>, GenerationError>;

    /// Dispatches a [`GenerationRequest`] to the matching operation.
    async fn run(&self, request: &GenerationRequest) -> Result<Vec<String>, GenerationError> {
        match request {
            GenerationRequest::Generate { prompt } => self.generate(prompt).await,
            GenerationRequest::Continue {
                original_prompt,
                prior_paragraphs,
            } => self.continue_writing(original_prompt, prior_paragraphs).await,
        }
    }
}

// ============================================================================
// Gateway
// ============================================================================

pub struct Gateway {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    system_prompt: String,
    max_output_tokens: u32,
}

impl Gateway {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model: String,
        system_prompt: String,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            provider,
            model,
            system_prompt,
            max_output_tokens,
        }
    }

    /// Builds the provider named in `config` and wraps it in a gateway.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ProviderError> {
        let provider = build_provider(config)?;
        Ok(Self::new(
            provider,
            config.model_name.clone(),
            config.system_prompt.clone(),
            config.max_output_tokens,
        ))
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<Vec<String>, GenerationError> {
        let request = CompletionRequest {
            messages,
            model: &self.model,
            max_output_tokens: self.max_output_tokens,
        };

        let content = self.provider.complete(request).await.map_err(|e| {
            warn!("{} completion failed: {}", self.provider.name(), e);
            GenerationError::from(e)
        })?;

        let paragraphs = match content {
            Some(text) if !text.trim().is_empty() => split_paragraphs(&text),
            _ => vec![NO_RESPONSE_PLACEHOLDER.to_string()],
        };
        info!("Generated {} paragraph(s)", paragraphs.len());
        Ok(paragraphs)
    }
}

#[async_trait]
impl WritingBackend for Gateway {
    fn label(&self) -> String {
        self.model.clone()
    }

    async fn generate(&self, prompt: &str) -> Result<Vec<String>, GenerationError> {
        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(prompt),
        ];
        self.complete(&messages).await
    }

    async fn continue_writing(
        &self,
        original_prompt: &str,
        prior_paragraphs: &[String],
    ) -> Result<Vec<String>, GenerationError> {
        let messages = continuation_messages(&self.system_prompt, original_prompt, prior_paragraphs);
        self.complete(&messages).await
    }
}

/// Builds the provider selected by `config.provider`.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    match config.provider.as_str() {
        "lmstudio" => Ok(Arc::new(LmStudioProvider::new(Some(
            config.lmstudio_base_url.clone(),
        )))),
        "openai" => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                ProviderError::Config(
                    "OpenAI API key must be set (config file, OPENAI_API_KEY env var, or --provider lmstudio)"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(OpenAiProvider::new(
                api_key,
                Some(config.openai_base_url.clone()),
            )))
        }
        other => Err(ProviderError::Config(format!("unknown provider '{other}'"))),
    }
}

fn continuation_messages(
    system_prompt: &str,
    original_prompt: &str,
    prior_paragraphs: &[String],
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(original_prompt),
        ChatMessage::assistant(prior_paragraphs.join("\n\n")),
        ChatMessage::user(CONTINUE_INSTRUCTION),
    ]
}

/// Splits raw model output on blank-line boundaries, dropping empty fragments.
/// Fragments are otherwise kept exactly as the model wrote them.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .filter(|fragment| !fragment.trim().is_empty())
        .map(str::to_string)
        .collect()
}
