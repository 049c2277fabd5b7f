use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Panic hook for `CatchPanicLayer`: a handler that blows up still answers
/// with the standard internal-error body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::internal(message).into_response()
}
