mod answer;
mod document;
mod document_id;
mod extraction;
mod service_response;

pub use answer::{DECORATIVE_CHARS, clean_text, is_decorative};
pub use document::{Document, DocumentFormat, DocumentKind, SpreadsheetDialect, UploadedDocument};
pub use document_id::DocumentId;
pub use extraction::ExtractionResult;
pub use service_response::{ResponseShape, ServiceResponse};
