use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
mod repo;
mod services;

pub fn router() -> Router<AppState> {
    handlers::performance_routes()
}
