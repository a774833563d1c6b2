use async_trait::async_trait;

use super::FileLoaderError;

#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognizes the text of a single encoded raster image.
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
}

impl From<OcrError> for FileLoaderError {
    fn from(error: OcrError) -> Self {
        match error {
            OcrError::EngineUnavailable(msg) => FileLoaderError::MissingDependency(msg),
            OcrError::RecognitionFailed(msg) => FileLoaderError::OcrFailure(msg),
        }
    }
}
