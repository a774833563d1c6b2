use std::sync::Arc;

use crate::application::ports::{DocumentExtractor, LlmClient};
use crate::application::services::{AnswerPipeline, UploadService};

pub struct AppState<E, L>
where
    E: DocumentExtractor + ?Sized,
    L: LlmClient + ?Sized,
{
    pub upload_service: Arc<UploadService<E>>,
    pub answer_pipeline: Arc<AnswerPipeline<L>>,
}

impl<E, L> AppState<E, L>
where
    E: DocumentExtractor + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(upload_service: UploadService<E>, answer_pipeline: AnswerPipeline<L>) -> Self {
        Self {
            upload_service: Arc::new(upload_service),
            answer_pipeline: Arc::new(answer_pipeline),
        }
    }
}

impl<E, L> Clone for AppState<E, L>
where
    E: DocumentExtractor + ?Sized,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            upload_service: Arc::clone(&self.upload_service),
            answer_pipeline: Arc::clone(&self.answer_pipeline),
        }
    }
}
