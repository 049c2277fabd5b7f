pub mod health;
pub mod interview;
pub mod upload;

pub use health::*;
pub use interview::*;
pub use upload::*;

use std::path::Path;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderMap, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::{logging_middleware, panic_response, REQUEST_ID_HEADER};
use crate::state::AppState;

// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Assemble the full application: API routes, static front-end, CORS,
/// request logging and panic recovery.
pub fn create_router(state: AppState, config: &Config) -> AppResult<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| AppError::config(format!("Invalid CORS_ORIGIN: {}", e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let body_limit = state
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    // Used both for unknown paths and for known paths hit with another
    // method, so `GET /api/upload-pdf` lands on the front-end like any
    // other browser route.
    let files = static_files(&config.static_dir);
    let front_end = move |request: Request| serve_front_end(files.clone(), request);

    let api = Router::new()
        .route(
            "/api/upload-pdf",
            post(upload_pdf_handler).fallback(front_end.clone()),
        )
        .route(
            "/api/save-interview",
            post(save_interview_handler).fallback(front_end.clone()),
        )
        .route(
            "/api/health",
            get(health_handler).fallback(front_end.clone()),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    Ok(api
        .fallback(front_end)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(cors),
        ))
}

/// Files under `dir` are served as-is; every other GET gets the entry document.
fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

/// GET and HEAD get the static front-end; anything else is a JSON 404.
async fn serve_front_end(files: ServeDir<ServeFile>, request: Request) -> Response {
    let method = request.method().clone();
    if method != Method::GET && method != Method::HEAD {
        return AppError::route_not_found(method.as_str(), request.uri().path()).into_response();
    }

    match files.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Id assigned by the logging middleware, or `-` when it did not run.
pub(crate) fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|id| id.chars().take(8).collect())
        .unwrap_or_else(|| "-".to_string())
}
