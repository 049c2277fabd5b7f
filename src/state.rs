use std::sync::Arc;

use crate::config::Config;
use crate::services::{InterviewRecordStore, QuestionExtractor, TextExtractor};
use crate::storage::InterviewRepository;

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionExtractor,
    pub interviews: InterviewRecordStore,
    pub max_file_size_mb: usize,
    pub max_file_size_bytes: usize,
}

impl AppState {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        repository: Arc<dyn InterviewRepository>,
        config: &Config,
    ) -> Self {
        Self {
            questions: QuestionExtractor::new(text_extractor),
            interviews: InterviewRecordStore::new(repository),
            max_file_size_mb: config.max_file_size_mb,
            max_file_size_bytes: config.max_file_size_bytes(),
        }
    }
}
