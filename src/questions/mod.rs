use crate::state::AppState;
use axum::Router;

pub mod bank;
mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo_types::QuestionAnswer;

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    handlers::question_routes(max_upload_bytes)
}
