use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::handlers::request_id;
use crate::models::{is_pdf_mime_type, UploadResponse, UploadedPdf};
use crate::state::AppState;

/// Name of the multipart field carrying the document.
pub const PDF_FIELD: &str = "pdf";

pub async fn upload_pdf_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    info!(request_id = %request_id, "Starting PDF upload request");

    let mut multipart = multipart.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Upload is not a multipart form");
        AppError::upload_rejected("No PDF file uploaded")
    })?;

    let file = match extract_pdf_from_multipart(&mut multipart, &state).await {
        Ok(file) => {
            info!(
                request_id = %request_id,
                file_name = %file.name,
                file_size = file.size,
                "File extracted from multipart form"
            );
            file
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Upload rejected");
            return Err(e);
        }
    };

    let questions = match state.questions.extract(file.content).await {
        Ok(questions) => questions,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "PDF processing failed");
            return Err(e);
        }
    };

    info!(
        request_id = %request_id,
        questions = questions.len(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Upload request completed successfully"
    );

    Ok(Json(UploadResponse::new(questions)))
}

async fn extract_pdf_from_multipart(
    multipart: &mut Multipart,
    state: &AppState,
) -> AppResult<UploadedPdf> {
    let max_file_size_mb = state.max_file_size_mb;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::FileTooLarge { limit_mb: max_file_size_mb }
        } else {
            AppError::upload_rejected(format!("Failed to read multipart field: {}", e.body_text()))
        }
    })? {
        if field.name() != Some(PDF_FIELD) {
            debug!(field = ?field.name(), "Skipping unrelated multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());

        // Filter on the declared type before reading the body.
        if !content_type.as_deref().is_some_and(is_pdf_mime_type) {
            return Err(AppError::upload_rejected("Only PDF files are allowed"));
        }

        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::FileTooLarge { limit_mb: max_file_size_mb }
            } else {
                AppError::upload_rejected(format!("Failed to read file data: {}", e.body_text()))
            }
        })?;

        if data.len() > state.max_file_size_bytes {
            return Err(AppError::FileTooLarge { limit_mb: max_file_size_mb });
        }

        let mut file = UploadedPdf::new(file_name, data);
        if let Some(mime_type) = content_type {
            file = file.with_mime_type(mime_type);
        }

        debug!(
            "Extracted file: {} ({} bytes, type: {:?})",
            file.name,
            file.size,
            file.mime_type
        );

        return Ok(file);
    }

    Err(AppError::upload_rejected("No PDF file uploaded"))
}
