use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{DocumentExtractor, FileLoaderError, LlmClient};
use crate::domain::UploadedDocument;
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub extracted_text: String,
}

/// Extracts a preview from the first file part of a multipart upload.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<E, L>(
    State(state): State<AppState<E, L>>,
    mut multipart: Multipart,
) -> Response
where
    E: DocumentExtractor + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let upload = match first_file(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(detail) => {
            tracing::error!(error = %detail, "Failed to read multipart");
            return error_response(StatusCode::BAD_REQUEST, detail);
        }
    };

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        "File data received"
    );

    match state.upload_service.preview(upload).await {
        Ok(result) => (
            StatusCode::OK,
            Json(UploadResponse {
                extracted_text: result.text,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Extraction failed");
            } else {
                tracing::warn!(error = %e, "Upload rejected");
            }
            error_response(status, e.to_string())
        }
    }
}

async fn first_file(multipart: &mut Multipart) -> Result<Option<UploadedDocument>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read multipart: {e}"))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read file: {e}"))?;

        return Ok(Some(UploadedDocument::new(filename, bytes.to_vec())));
    }

    Ok(None)
}

fn status_for(error: &FileLoaderError) -> StatusCode {
    match error {
        FileLoaderError::MissingDependency(_) | FileLoaderError::Staging(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        FileLoaderError::UnsupportedFormat(_)
        | FileLoaderError::OcrFailure(_)
        | FileLoaderError::TabularParseFailure(_)
        | FileLoaderError::NoTextFound(_) => StatusCode::BAD_REQUEST,
    }
}
