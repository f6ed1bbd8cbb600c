//! Mock provider for tests and offline runs.

use super::{ChatMessage, Completion, CompletionParams, CompletionProvider, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Upstream { status: u16, body: String },
}

/// Returns a canned reply for every call.
#[derive(Debug)]
pub struct MockCompletionProvider {
    reply: Reply,
    calls: AtomicUsize,
}

impl MockCompletionProvider {
    /// Answer every completion with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every completion as if the API answered with `status`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Upstream {
                status,
                body: body.into(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _params: &CompletionParams,
    ) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.reply {
            Reply::Text(text) => Ok(Completion {
                text: text.clone(),
                prompt_tokens: messages.iter().map(|m| m.content.len() as u32 / 4).sum(),
                completion_tokens: text.len() as u32 / 4,
                finish_reason: Some("stop".to_string()),
            }),
            Reply::Upstream { status, body } => Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
