use crate::state::AppState;
use axum::Router;

pub mod handlers;
mod kinds;
pub mod services;

pub use kinds::{DocumentKind, RecordingKind};

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    handlers::file_routes(max_upload_bytes)
}
