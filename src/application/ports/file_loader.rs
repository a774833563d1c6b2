use std::path::Path;

use async_trait::async_trait;

use crate::domain::{Document, ExtractionResult, UploadedDocument};

/// Converts one staged upload into text.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        staged: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError>;
}

/// Entry point for a raw upload: format resolution, staging and routing.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, upload: UploadedDocument) -> Result<ExtractionResult, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("OCR failed: {0}")]
    OcrFailure(String),
    #[error("could not parse table: {0}")]
    TabularParseFailure(String),
    #[error("missing dependency: {0}")]
    MissingDependency(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("staging failed: {0}")]
    Staging(String),
}
