mod analyze;
mod error;
mod health;
mod upload;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, analyze_handler};
pub use error::{ErrorResponse, error_response};
pub use health::health_handler;
pub use upload::{UploadResponse, upload_handler};
