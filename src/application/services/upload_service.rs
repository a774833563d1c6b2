use std::sync::Arc;

use crate::application::ports::{DocumentExtractor, FileLoaderError};
use crate::domain::{ExtractionResult, UploadedDocument};

pub const DEFAULT_MAX_PREVIEW_CHARS: usize = 2000;

pub struct UploadService<E>
where
    E: DocumentExtractor + ?Sized,
{
    extractor: Arc<E>,
    max_preview_chars: usize,
}

impl<E> UploadService<E>
where
    E: DocumentExtractor + ?Sized,
{
    pub fn new(extractor: Arc<E>, max_preview_chars: usize) -> Self {
        Self {
            extractor,
            max_preview_chars,
        }
    }

    /// Extracts the upload and bounds it for transport.
    ///
    /// Tabular previews are already row-capped when rendered, so the character
    /// cap only applies to OCR output.
    pub async fn preview(
        &self,
        upload: UploadedDocument,
    ) -> Result<ExtractionResult, FileLoaderError> {
        let filename = upload.filename.clone();
        let result = self.extractor.extract(upload).await?;

        if result.is_blank() {
            tracing::warn!(filename = %filename, "Extraction produced no text");
            return Err(FileLoaderError::NoTextFound(filename));
        }

        if result.kind.is_tabular() {
            return Ok(result);
        }

        let extracted_chars = result.text.chars().count();
        if extracted_chars > self.max_preview_chars {
            tracing::debug!(
                extracted_chars,
                max_preview_chars = self.max_preview_chars,
                "Truncating extracted text for preview"
            );
        }

        Ok(result.truncated(self.max_preview_chars))
    }
}
