use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentExtractor, LlmClient};
use crate::application::services::AnalyzeError;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Missing and `null` both read as an empty prompt.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_handler<E, L>(
    State(state): State<AppState<E, L>>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response
where
    E: DocumentExtractor + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let text = match request {
        Ok(Json(request)) => request.text.unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected analysis payload");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    tracing::debug!(prompt = %sanitize_for_log(&text), "Processing analysis");

    match state.answer_pipeline.analyze(&text).await {
        Ok(result) => (StatusCode::OK, Json(AnalyzeResponse { result })).into_response(),
        Err(AnalyzeError::EmptyPrompt) => {
            error_response(StatusCode::BAD_REQUEST, AnalyzeError::EmptyPrompt.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Watsonx error: {e}"),
            )
        }
    }
}
