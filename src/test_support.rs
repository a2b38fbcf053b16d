//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::inference::{ChatMessage, CompletionProvider, CompletionRequest, ProviderError};

/// Owned copy of a `CompletionRequest`, captured for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub max_output_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// A provider that answers every request with the same canned content.
pub struct ScriptedProvider {
    reply: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers successfully but with no content (`content: null`).
    pub fn empty() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Option<String>, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: request.model.to_string(),
            max_output_tokens: request.max_output_tokens,
            messages: request.messages.to_vec(),
        });
        Ok(self.reply.clone())
    }
}

/// A provider whose every call fails with HTTP 500.
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<Option<String>, ProviderError> {
        Err(ProviderError::Api {
            status: 500,
            message: "upstream exploded".to_string(),
        })
    }
}

/// Creates a test App with an empty session.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new("test-model".to_string())
}
