//! Generation pipeline: prompt, completion call, post-processing.

use crate::dtos::{GenerateMaterialRequest, GenerateMcqRequest};
use crate::models::QuestionSet;
use crate::services::material::{wrap_text, MATERIAL_WIDTH};
use crate::services::normalizer::{normalize, NormalizeError};
use crate::services::prompts::{material_messages, mcq_messages};
use crate::services::providers::{CompletionParams, CompletionProvider, ProviderError};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Every generation failure reaches the caller as a 400 with its message.
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

/// Runs one completion per request against the configured provider.
#[derive(Clone)]
pub struct QuizGenerator {
    provider: Arc<dyn CompletionProvider>,
    mcq_params: CompletionParams,
}

impl QuizGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, mcq_params: CompletionParams) -> Self {
        Self {
            provider,
            mcq_params,
        }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    #[tracing::instrument(skip(self, req), fields(model = %self.provider.model()))]
    pub async fn generate_mcqs(
        &self,
        req: &GenerateMcqRequest,
    ) -> Result<QuestionSet, GenerationError> {
        let completion = self
            .provider
            .complete(&mcq_messages(req), &self.mcq_params)
            .await?;

        let questions = normalize(&completion.text).map_err(|e| {
            tracing::warn!(
                error = %e,
                output_len = completion.text.len(),
                "Model output failed normalization"
            );
            e
        })?;

        tracing::info!(
            question_count = questions.len(),
            prompt_tokens = completion.prompt_tokens,
            completion_tokens = completion.completion_tokens,
            "Generated questions"
        );

        Ok(questions)
    }

    #[tracing::instrument(skip(self, req), fields(model = %self.provider.model()))]
    pub async fn generate_material(
        &self,
        req: &GenerateMaterialRequest,
    ) -> Result<String, GenerationError> {
        let completion = self
            .provider
            .complete(&material_messages(req), &CompletionParams::default())
            .await?;

        let text = completion.text.trim();
        if text.is_empty() {
            return Err(NormalizeError::EmptyResponse.into());
        }

        tracing::info!(
            content_len = text.len(),
            completion_tokens = completion.completion_tokens,
            "Generated material"
        );

        Ok(wrap_text(text, MATERIAL_WIDTH))
    }
}
