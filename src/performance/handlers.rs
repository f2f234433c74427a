use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppError,
    performance::{
        dto::{InterviewDetails, InterviewSummary},
        services,
    },
    state::AppState,
};

pub fn performance_routes() -> Router<AppState> {
    Router::new()
        .route("/interviews/:user_id", get(list_interviews))
        .route("/interview/:interview_id/details", get(interview_details))
}

#[instrument(skip(state))]
pub async fn list_interviews(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<InterviewSummary>>, AppError> {
    Ok(Json(services::list_interviews(&state.db, user_id).await?))
}

#[instrument(skip(state))]
pub async fn interview_details(
    State(state): State<AppState>,
    Path(interview_id): Path<i64>,
) -> Result<Json<InterviewDetails>, AppError> {
    Ok(Json(services::interview_details(&state.db, interview_id).await?))
}
