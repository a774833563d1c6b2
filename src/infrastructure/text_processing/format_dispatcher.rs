use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{DocumentExtractor, FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat, DocumentKind, ExtractionResult, UploadedDocument};

use super::staged_file::StagedFile;

/// Routes an upload to the loader registered for its format.
pub struct FormatDispatcher {
    loaders: HashMap<DocumentKind, Arc<dyn FileLoader>>,
}

impl FormatDispatcher {
    pub fn new(loaders: Vec<(DocumentKind, Arc<dyn FileLoader>)>) -> Self {
        Self {
            loaders: loaders.into_iter().collect(),
        }
    }

    /// Images and PDFs go through OCR, delimited text and workbooks through
    /// the tabular previewer.
    pub fn with_loaders(ocr: Arc<dyn FileLoader>, tabular: Arc<dyn FileLoader>) -> Self {
        Self::new(vec![
            (DocumentKind::Image, Arc::clone(&ocr)),
            (DocumentKind::Pdf, ocr),
            (DocumentKind::Delimited, Arc::clone(&tabular)),
            (DocumentKind::Spreadsheet, tabular),
        ])
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn dispatch(
        &self,
        filename: &str,
        data: &[u8],
    ) -> Result<ExtractionResult, FileLoaderError> {
        let format = DocumentFormat::from_filename(filename).ok_or_else(|| {
            tracing::warn!("Rejected upload with unsupported extension");
            FileLoaderError::UnsupportedFormat(filename.to_string())
        })?;

        let kind = format.kind();
        let loader = self
            .loaders
            .get(&kind)
            .ok_or_else(|| FileLoaderError::UnsupportedFormat(filename.to_string()))?;

        let document = Document::new(filename.to_string(), format, data.len() as u64);
        let staged = StagedFile::stage(data, format.extension())?;

        tracing::debug!(
            document_id = %document.id,
            format = ?format,
            staged_path = %staged.path().display(),
            "Upload staged for extraction"
        );

        let text = loader.extract_text(staged.path(), &document).await?;

        tracing::info!(
            document_id = %document.id,
            chars = text.chars().count(),
            "Extraction complete"
        );

        Ok(ExtractionResult::new(text, kind))
    }
}

#[async_trait]
impl DocumentExtractor for FormatDispatcher {
    async fn extract(&self, upload: UploadedDocument) -> Result<ExtractionResult, FileLoaderError> {
        self.dispatch(&upload.filename, &upload.bytes).await
    }
}
