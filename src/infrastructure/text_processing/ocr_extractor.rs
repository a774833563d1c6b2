use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, OcrEngine, PageRasterizer};
use crate::domain::{Document, DocumentKind};

use super::staged_file::read_staged;

pub const DEFAULT_RASTERIZE_TIMEOUT: Duration = Duration::from_secs(120);

/// Page texts are joined with a single newline, in page order.
const PAGE_SEPARATOR: &str = "\n";

pub struct OcrExtractor {
    engine: Arc<dyn OcrEngine>,
    rasterizer: Arc<dyn PageRasterizer>,
    rasterize_timeout: Duration,
}

impl OcrExtractor {
    pub fn new(engine: Arc<dyn OcrEngine>, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self {
            engine,
            rasterizer,
            rasterize_timeout: DEFAULT_RASTERIZE_TIMEOUT,
        }
    }

    pub fn with_rasterize_timeout(mut self, timeout: Duration) -> Self {
        self.rasterize_timeout = timeout;
        self
    }

    /// Engine output is returned verbatim.
    pub async fn extract_image(&self, image: &[u8]) -> Result<String, FileLoaderError> {
        Ok(self.engine.recognize(image).await?)
    }

    pub async fn extract_pdf(&self, pdf: &[u8]) -> Result<String, FileLoaderError> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let data = pdf.to_vec();

        let pages = tokio::time::timeout(
            self.rasterize_timeout,
            tokio::task::spawn_blocking(move || rasterizer.rasterize(&data)),
        )
        .await
        .map_err(|_| FileLoaderError::OcrFailure("PDF rasterization timed out".to_string()))?
        .map_err(|e| FileLoaderError::OcrFailure(format!("rasterization task failed: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF rasterized, running OCR per page");

        let mut page_texts = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let text = self.engine.recognize(page).await.map_err(|e| {
                tracing::error!(page = index + 1, error = %e, "OCR failed on page");
                FileLoaderError::from(e)
            })?;
            page_texts.push(text);
        }

        Ok(page_texts.join(PAGE_SEPARATOR))
    }
}

#[async_trait]
impl FileLoader for OcrExtractor {
    #[tracing::instrument(
        skip(self, staged),
        fields(document_id = %document.id, filename = %document.filename)
    )]
    async fn extract_text(
        &self,
        staged: &Path,
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let data = read_staged(staged).await?;

        match document.format.kind() {
            DocumentKind::Image => self.extract_image(&data).await,
            DocumentKind::Pdf => self.extract_pdf(&data).await,
            DocumentKind::Delimited | DocumentKind::Spreadsheet => Err(
                FileLoaderError::UnsupportedFormat(document.format.extension().to_string()),
            ),
        }
    }
}
