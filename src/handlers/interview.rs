use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use tracing::{error, info};

use crate::error::AppResult;
use crate::handlers::request_id;
use crate::models::{InterviewRecord, SaveInterviewRequest};
use crate::state::AppState;

pub async fn save_interview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SaveInterviewRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<InterviewRecord>)> {
    let request_id = request_id(&headers);
    // Non-JSON bodies are read as empty, so they fail field validation.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => SaveInterviewRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    info!(request_id = %request_id, "Starting save-interview request");

    match state.interviews.save(request).await {
        Ok(record) => {
            info!(
                request_id = %request_id,
                record_id = %record.id,
                "Interview persisted"
            );
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Save error");
            Err(e)
        }
    }
}
