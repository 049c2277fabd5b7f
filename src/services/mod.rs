pub mod interview_store;
pub mod pdf_processor;

pub use interview_store::InterviewRecordStore;
pub use pdf_processor::{questions_from_text, PdfTextExtractor, QuestionExtractor, TextExtractor};
