use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ServiceResponse;

/// Returns a fixed payload, or fails every call.
pub struct MockLlmClient {
    outcome: Result<ServiceResponse, String>,
}

impl MockLlmClient {
    pub fn returning(response: impl Into<ServiceResponse>) -> Self {
        Self {
            outcome: Ok(response.into()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<ServiceResponse, LlmClientError> {
        self.outcome
            .clone()
            .map_err(LlmClientError::ApiRequestFailed)
    }
}
