use std::path::PathBuf;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::{FileLoaderError, PageRasterizer};

pub const DEFAULT_RENDER_DPI: f32 = 300.0;

/// Renders PDF pages to PNG through pdfium.
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
    render_dpi: f32,
}

impl PdfiumRasterizer {
    pub fn new(library_dir: Option<PathBuf>, render_dpi: f32) -> Self {
        Self {
            library_dir,
            render_dpi,
        }
    }

    fn bind(&self) -> Result<Pdfium, FileLoaderError> {
        let bindings = match &self.library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| FileLoaderError::MissingDependency(format!("pdfium bind failed: {e}")))?;

        Ok(Pdfium::new(bindings))
    }
}

impl Default for PdfiumRasterizer {
    fn default() -> Self {
        Self::new(None, DEFAULT_RENDER_DPI)
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, FileLoaderError> {
        let pdfium = self.bind()?;

        let doc = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| FileLoaderError::OcrFailure(format!("pdfium open failed: {e}")))?;

        let mut png_buffers: Vec<Vec<u8>> = Vec::with_capacity(doc.pages().len() as usize);

        for (index, page) in doc.pages().iter().enumerate() {
            let width = (page.width().value * self.render_dpi / 72.0) as i32;
            let height = (page.height().value * self.render_dpi / 72.0) as i32;

            let bitmap = page
                .render_with_config(
                    &PdfRenderConfig::new()
                        .set_target_width(width)
                        .set_target_height(height),
                )
                .map_err(|e| {
                    FileLoaderError::OcrFailure(format!("render page {} failed: {e}", index + 1))
                })?;

            let mut png_bytes: Vec<u8> = Vec::new();
            bitmap
                .as_image()
                .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
                .map_err(|e| {
                    FileLoaderError::OcrFailure(format!("PNG encode page {} failed: {e}", index + 1))
                })?;

            png_buffers.push(png_bytes);
        }

        Ok(png_buffers)
    }
}
