use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Body of `POST /api/save-interview`.
///
/// Fields stay loosely typed so presence and shape checks happen in
/// [`crate::services::InterviewRecordStore`], not in the JSON extractor.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveInterviewRequest {
    #[serde(default)]
    pub interview_field: Option<Value>,
    #[serde(default)]
    pub qa_pairs: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct UploadedPdf {
    pub name: String,
    pub size: usize,
    pub content: Bytes,
    pub mime_type: Option<String>,
}

impl UploadedPdf {
    pub fn new(name: String, content: Bytes) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: String) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    /// Only the declared MIME type counts; file names and magic bytes are not consulted.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.as_deref().is_some_and(is_pdf_mime_type)
    }
}

pub fn is_pdf_mime_type(mime_type: &str) -> bool {
    mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
}
