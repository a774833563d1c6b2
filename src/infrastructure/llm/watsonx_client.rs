use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ServiceResponse;
use crate::presentation::config::{CompletionMode, WatsonxSettings};

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// watsonx.ai foundation-model client.
///
/// A fresh IAM token is exchanged for every call so no credential state is
/// shared between requests.
pub struct WatsonxClient {
    client: Client,
    settings: WatsonxSettings,
}

#[derive(Deserialize)]
struct IamToken {
    access_token: String,
}

impl WatsonxClient {
    pub fn new(settings: WatsonxSettings) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("http client: {e}")))?;

        Ok(Self { client, settings })
    }

    async fn access_token(&self) -> Result<String, LlmClientError> {
        let url = format!(
            "{}/identity/token",
            self.settings.iam_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", IAM_GRANT_TYPE),
                ("apikey", self.settings.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "IAM token exchange rejected");
            return Err(LlmClientError::Authentication(format!(
                "token exchange returned {status}"
            )));
        }

        let token: IamToken = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(format!("token response: {e}")))?;

        Ok(token.access_token)
    }

    fn request(&self, system: &str, user: &str) -> (&'static str, Value) {
        let s = &self.settings;
        match s.mode {
            CompletionMode::Chat => (
                "chat",
                json!({
                    "model_id": s.model_id,
                    "project_id": s.project_id,
                    "messages": [
                        { "role": "system", "content": system },
                        { "role": "user", "content": user }
                    ],
                    "max_tokens": s.max_tokens,
                    "temperature": s.temperature,
                    "top_p": s.top_p
                }),
            ),
            CompletionMode::Generation => (
                "generation",
                json!({
                    "model_id": s.model_id,
                    "project_id": s.project_id,
                    "input": format!("{system}\n\n{user}"),
                    "parameters": {
                        "max_new_tokens": s.max_tokens,
                        "temperature": s.temperature,
                        "top_p": s.top_p
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl LlmClient for WatsonxClient {
    #[tracing::instrument(skip_all, fields(model_id = %self.settings.model_id, mode = ?self.settings.mode))]
    async fn complete(&self, system: &str, user: &str) -> Result<ServiceResponse, LlmClientError> {
        let token = self.access_token().await?;
        let (endpoint, body) = self.request(system, user);

        let url = format!(
            "{}/ml/v1/text/{endpoint}?version={}",
            self.settings.url.trim_end_matches('/'),
            self.settings.api_version
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("watsonx rate limit hit");
            return Err(LlmClientError::RateLimited);
        }

        if !status.is_success() {
            tracing::error!(%status, body = %text, "watsonx request failed");
            return Err(LlmClientError::ApiRequestFailed(format!(
                "watsonx returned {status}"
            )));
        }

        Ok(ServiceResponse::from_body(&text))
    }
}

fn transport_error(error: reqwest::Error) -> LlmClientError {
    if error.is_timeout() {
        LlmClientError::Timeout
    } else {
        LlmClientError::ApiRequestFailed(error.to_string())
    }
}
