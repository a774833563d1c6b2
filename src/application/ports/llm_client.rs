use async_trait::async_trait;

use crate::domain::ServiceResponse;

/// Inference service behind the analysis pipeline.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one system + user exchange and hands back the payload untouched.
    async fn complete(&self, system: &str, user: &str) -> Result<ServiceResponse, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

