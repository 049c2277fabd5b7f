use axum::{extract::State, response::Json};
use tracing::{info, warn};

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let repository = state.interviews.repository();

    let storage = match repository.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(backend = repository.name(), error = %e, "Storage ping failed");
            false
        }
    };

    let status = if storage { "healthy" } else { "degraded" };

    info!(status = status, storage = storage, "Health check completed");

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    })
}
