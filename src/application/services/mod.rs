mod answer_pipeline;
mod upload_service;

pub use answer_pipeline::{AnalyzeError, AnswerPipeline, DEFAULT_SYSTEM_PROMPT};
pub use upload_service::{DEFAULT_MAX_PREVIEW_CHARS, UploadService};
