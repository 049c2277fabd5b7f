//! Unit tests for individual components

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use interview_qa::{
    error::AppError,
    models::{InterviewField, InterviewRecord, QaPair, SaveInterviewRequest},
    services::{questions_from_text, InterviewRecordStore},
    storage::{InterviewRepository, MemoryRepository},
    AppResult,
};
use serde_json::json;

/// Repository whose writes always fail, as an unreachable database would.
#[derive(Default)]
struct UnreachableRepository {
    attempts: AtomicUsize,
}

impl InterviewRepository for UnreachableRepository {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn insert<'a>(
        &'a self,
        _record: &'a InterviewRecord,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Err(AppError::persistence("connection refused")) })
    }

    fn ping(&self) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + '_>> {
        Box::pin(async { Err(AppError::persistence("connection refused")) })
    }
}

fn request(value: serde_json::Value) -> SaveInterviewRequest {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::upload_rejected("x").error_code(), "UPLOAD_REJECTED");
    assert_eq!(AppError::FileTooLarge { limit_mb: 10 }.error_code(), "FILE_TOO_LARGE");
    assert_eq!(AppError::extraction("x").error_code(), "EXTRACTION_ERROR");
    assert_eq!(AppError::validation("x").error_code(), "VALIDATION_ERROR");
    assert_eq!(AppError::persistence("x").error_code(), "PERSISTENCE_ERROR");
    assert_eq!(AppError::internal("x").error_code(), "INTERNAL_ERROR");
    assert_eq!(AppError::config("x").error_code(), "CONFIG_ERROR");
    assert_eq!(AppError::route_not_found("POST", "/x").error_code(), "NOT_FOUND");
}

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::upload_rejected("x").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::FileTooLarge { limit_mb: 10 }.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::validation("x").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::extraction("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::persistence("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::internal("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::route_not_found("POST", "/x").status_code(), StatusCode::NOT_FOUND);
}

#[test]
fn test_error_bodies() {
    assert_eq!(
        AppError::extraction("bad xref").body(),
        json!({ "error": "Failed to process PDF file", "details": "bad xref" })
    );
    assert_eq!(
        AppError::validation("interviewField").body(),
        json!({ "error": "Missing required fields", "required": ["interviewField", "qaPairs"] })
    );
    assert_eq!(
        AppError::persistence("disk full").body(),
        json!({ "error": "Failed to save interview data", "details": "disk full" })
    );
    assert_eq!(
        AppError::internal("boom").body(),
        json!({ "error": "Internal Server Error", "message": "boom" })
    );
    assert_eq!(
        AppError::upload_rejected("No PDF file uploaded").body(),
        json!({ "error": "No PDF file uploaded" })
    );
    assert_eq!(
        AppError::route_not_found("DELETE", "/api/health").body(),
        json!({ "error": "Not Found", "message": "Cannot DELETE /api/health" })
    );
}

#[test]
fn test_error_conversions() {
    let anyhow_error = anyhow::anyhow!("Test error");
    let app_error: AppError = anyhow_error.into();
    match app_error {
        AppError::Internal { message } => assert!(message.contains("Test error")),
        _ => panic!("Expected Internal error"),
    }

    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    match app_error {
        AppError::Internal { message } => assert!(message.contains("IO error")),
        _ => panic!("Expected Internal error"),
    }
}

#[test]
fn test_extraction_numbers_every_non_blank_line() {
    let blobs = [
        "Only one question",
        "First\nSecond\nThird",
        "\n\nLeading blanks\n   \ttabbed   \n\nTrailing\n\n",
        "Windows\r\nline\r\nendings",
    ];

    for blob in blobs {
        let expected: Vec<&str> = blob
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let questions = questions_from_text(blob);

        assert_eq!(questions.len(), expected.len(), "blob: {:?}", blob);
        for (k, (question, line)) in questions.iter().zip(&expected).enumerate() {
            assert_eq!(question, &format!("{}. {}", k + 1, line));
        }
    }
}

#[test]
fn test_extraction_of_blank_text_is_empty() {
    assert!(questions_from_text("\n\n   \n").is_empty());
}

#[test]
fn test_extraction_strips_existing_numbering() {
    assert_eq!(
        questions_from_text("7.   What is polymorphism?"),
        vec!["1. What is polymorphism?"]
    );
    assert_eq!(
        questions_from_text("1. Tell me about yourself\n\nWhat are your strengths?"),
        vec!["1. Tell me about yourself", "2. What are your strengths?"]
    );
}

#[tokio::test]
async fn test_save_returns_record_with_id_and_timestamp() {
    let repo = Arc::new(MemoryRepository::new());
    let store = InterviewRecordStore::new(repo.clone());
    let before = Utc::now();

    let record = store
        .save(request(json!({
            "interviewField": "SDE",
            "qaPairs": [{ "hrQuestion": "Q1", "candidateAnswer": "A1" }]
        })))
        .await
        .unwrap();

    assert_eq!(record.interview_field, InterviewField::Sde);
    assert_eq!(record.qa_pairs, vec![QaPair::new("Q1", "A1")]);
    assert!(record.timestamp >= before);
    assert_eq!(repo.records(), vec![record]);
}

#[tokio::test]
async fn test_save_without_field_never_writes() {
    let repo = Arc::new(MemoryRepository::new());
    let store = InterviewRecordStore::new(repo.clone());

    for body in [
        json!({ "qaPairs": [] }),
        json!({ "interviewField": "", "qaPairs": [] }),
        json!({ "interviewField": "HR" }),
        json!({ "interviewField": "HR", "qaPairs": null }),
        json!({ "interviewField": "HR", "qaPairs": { "hrQuestion": "Q" } }),
    ] {
        let err = store.save(request(body.clone())).await.unwrap_err();
        assert!(
            matches!(err, AppError::ValidationError { .. }),
            "expected validation error for {}",
            body
        );
    }

    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_save_with_unknown_field_is_persistence_error() {
    let repo = Arc::new(MemoryRepository::new());
    let store = InterviewRecordStore::new(repo.clone());

    let err = store
        .save(request(json!({ "interviewField": "Unknown", "qaPairs": [] })))
        .await
        .unwrap_err();

    match err {
        AppError::PersistenceError { message } => assert!(message.contains("`Unknown`")),
        other => panic!("Expected PersistenceError, got {:?}", other),
    }
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_save_accepts_empty_pairs() {
    let repo = Arc::new(MemoryRepository::new());
    let store = InterviewRecordStore::new(repo.clone());

    let record = store
        .save(request(json!({ "interviewField": "Manager", "qaPairs": [] })))
        .await
        .unwrap();

    assert!(record.qa_pairs.is_empty());
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_save_with_malformed_pair_is_persistence_error() {
    let repo = Arc::new(MemoryRepository::new());
    let store = InterviewRecordStore::new(repo.clone());

    let err = store
        .save(request(json!({ "interviewField": "HR", "qaPairs": ["not an object"] })))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "PERSISTENCE_ERROR");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_storage_failure_surfaces_as_persistence_error() {
    let repo = Arc::new(UnreachableRepository::default());
    let store = InterviewRecordStore::new(repo.clone());

    let err = store
        .save(request(json!({ "interviewField": "HR", "qaPairs": [] })))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "connection refused");
    assert_eq!(repo.attempts.load(Ordering::SeqCst), 1);
}
