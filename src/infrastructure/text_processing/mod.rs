mod delimiter_sniffer;
mod format_dispatcher;
mod ocr_extractor;
mod pdf_rasterizer;
mod staged_file;
mod tabular_previewer;
mod tesseract_engine;
mod text_table;

pub use delimiter_sniffer::{
    CANDIDATE_DELIMITERS, FALLBACK_DELIMITER, SNIFF_SAMPLE_BYTES, detect_delimiter,
    sniff_delimiter,
};
pub use format_dispatcher::FormatDispatcher;
pub use ocr_extractor::{DEFAULT_RASTERIZE_TIMEOUT, OcrExtractor};
pub use pdf_rasterizer::{DEFAULT_RENDER_DPI, PdfiumRasterizer};
pub use staged_file::StagedFile;
pub use tabular_previewer::{DEFAULT_MAX_PREVIEW_ROWS, TabularPreviewer};
pub use tesseract_engine::{
    DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT, DEFAULT_TESSERACT_CMD, TesseractEngine,
};
pub use text_table::TextTable;
