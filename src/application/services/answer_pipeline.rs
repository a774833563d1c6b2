use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ServiceResponse, clean_text};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a concise finance assistant. \
Answer clearly in bullet points. If unsure, say so.";

pub struct AnswerPipeline<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
    system_prompt: String,
}

impl<L> AnswerPipeline<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm_client,
            system_prompt: system_prompt.into(),
        }
    }

    /// Runs one completion for `text` and reduces the payload to a clean answer.
    ///
    /// A failed call is surfaced as-is; nothing here retries.
    pub async fn analyze(&self, text: &str) -> Result<String, AnalyzeError> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(AnalyzeError::EmptyPrompt);
        }

        let raw = self
            .llm_client
            .complete(&self.system_prompt, prompt)
            .await
            .map_err(AnalyzeError::CollaboratorFailure)?;

        tracing::info!(raw_response = %raw, "Inference service responded");

        Self::answer(&raw).inspect_err(|_| {
            tracing::error!(raw_response = %raw, "No usable text in inference payload");
        })
    }

    pub fn answer(raw: &ServiceResponse) -> Result<String, AnalyzeError> {
        let candidate = raw.normalize().ok_or(AnalyzeError::EmptyOrUnknownPayload)?;
        let cleaned = clean_text(&candidate);

        if cleaned.is_empty() {
            return Err(AnalyzeError::EmptyOrUnknownPayload);
        }

        Ok(cleaned)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Empty prompt")]
    EmptyPrompt,
    #[error("{0}")]
    CollaboratorFailure(#[from] LlmClientError),
    #[error("Empty/unknown model payload")]
    EmptyOrUnknownPayload,
}
