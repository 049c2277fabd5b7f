use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use lopdf::Document;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};

// Existing "3. " style numbering at the start of a line.
static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+\.\s*").expect("numbering prefix pattern is valid")
});

/// Raw text extraction capability. Anything that turns PDF bytes into one
/// text blob can stand in here.
pub trait TextExtractor: Send + Sync {
    fn extract_text(
        &self,
        pdf: Bytes,
    ) -> Pin<Box<dyn Future<Output = AppResult<String>> + Send + '_>>;
}

/// [`TextExtractor`] backed by `lopdf` for structure and `pdf-extract` for text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(pdf: &[u8]) -> AppResult<String> {
        // Reject unparseable input before handing it to the text layer.
        let pages = Document::load_mem(pdf)
            .map(|doc| doc.get_pages().len())
            .map_err(|e| AppError::extraction(format!("Invalid PDF structure: {}", e)))?;

        tracing::debug!(pages = pages, "PDF structure loaded");

        pdf_extract::extract_text_from_mem(pdf)
            .map_err(|e| AppError::extraction(e.to_string()))
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(
        &self,
        pdf: Bytes,
    ) -> Pin<Box<dyn Future<Output = AppResult<String>> + Send + '_>> {
        Box::pin(async move {
            // pdf-extract is CPU bound and may panic on malformed fonts.
            tokio::task::spawn_blocking(move || Self::extract_blocking(&pdf))
                .await
                .map_err(|e| {
                    if e.is_panic() {
                        AppError::extraction("PDF parser panicked while reading the document")
                    } else {
                        AppError::extraction(format!("PDF extraction task failed: {}", e))
                    }
                })?
        })
    }
}

/// Turns uploaded PDFs into numbered question candidates.
#[derive(Clone)]
pub struct QuestionExtractor {
    text_extractor: Arc<dyn TextExtractor>,
}

impl QuestionExtractor {
    pub fn new(text_extractor: Arc<dyn TextExtractor>) -> Self {
        Self { text_extractor }
    }

    pub async fn extract(&self, pdf: Bytes) -> AppResult<Vec<String>> {
        let start = Instant::now();
        let size = pdf.len();

        let text = self.text_extractor.extract_text(pdf).await?;
        let questions = questions_from_text(&text);

        tracing::info!(
            file_size = size,
            text_length = text.len(),
            questions = questions.len(),
            processing_time_ms = start.elapsed().as_millis() as u64,
            "Questions extracted from PDF"
        );

        Ok(questions)
    }
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new(Arc::new(PdfTextExtractor::new()))
    }
}

/// Every non-blank line becomes a question, renumbered from 1 after any
/// leading "N." prefix is stripped.
pub fn questions_from_text(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| format!("{}. {}", index + 1, NUMBER_PREFIX.replace(line, "")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn extract_text(
            &self,
            _pdf: Bytes,
        ) -> Pin<Box<dyn Future<Output = AppResult<String>> + Send + '_>> {
            let text = self.0.to_string();
            Box::pin(async move { Ok(text) })
        }
    }

    #[test]
    fn numbers_each_non_blank_line_in_order() {
        let questions = questions_from_text("Alpha?\nBeta?\n\n   \nGamma?");
        assert_eq!(questions, vec!["1. Alpha?", "2. Beta?", "3. Gamma?"]);
    }

    #[test]
    fn blank_text_yields_nothing() {
        assert!(questions_from_text("").is_empty());
        assert!(questions_from_text("\n  \n\t\n").is_empty());
    }

    #[test]
    fn existing_numbering_is_replaced() {
        let questions = questions_from_text("7.   What is polymorphism?");
        assert_eq!(questions, vec!["1. What is polymorphism?"]);
    }

    #[test]
    fn bare_prefix_keeps_its_slot() {
        let questions = questions_from_text("3.\nNext one");
        assert_eq!(questions, vec!["1. ", "2. Next one"]);
    }

    #[test]
    fn only_leading_prefix_is_stripped() {
        let questions = questions_from_text("  12.Explain 2. and 3. here\r\n1.5 million users?");
        assert_eq!(
            questions,
            vec!["1. Explain 2. and 3. here", "2. 5 million users?"]
        );
    }

    #[tokio::test]
    async fn extractor_runs_collaborator_text_through_pipeline() {
        let extractor = QuestionExtractor::new(Arc::new(FixedText(
            "1. Tell me about yourself\n\nWhat are your strengths?",
        )));

        let questions = extractor.extract(Bytes::new()).await.unwrap();
        assert_eq!(
            questions,
            vec!["1. Tell me about yourself", "2. What are your strengths?"]
        );
    }

    #[tokio::test]
    async fn garbage_bytes_are_an_extraction_error() {
        let err = PdfTextExtractor::new()
            .extract_text(Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "EXTRACTION_ERROR");
    }
}
