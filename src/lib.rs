//! Interview Q&A Service
//!
//! Turns uploaded PDFs into numbered interview questions and stores
//! interviewer/candidate question-answer sets by interview category.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::create_router;
pub use state::AppState;
