//! Chat-completion provider abstraction.
//!
//! Generation code talks to [`CompletionProvider`] so the upstream LLM
//! service can be swapped (Groq in production, a mock in tests).

pub mod groq;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use groq::GroqProvider;
pub use mock::MockCompletionProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Non-2xx answer from the completion API.
    #[error("Completion API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters. `None` leaves the provider default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Buffered result of a completion call.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Generated text; empty when the envelope carried no content.
    pub text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub finish_reason: Option<String>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one chat completion and return the full generated text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<Completion, ProviderError>;

    /// Model identifier requests are sent with.
    fn model(&self) -> &str;
}
