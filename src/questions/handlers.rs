use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::AppError,
    files::{handlers::read_upload, services::upload_recording, RecordingKind},
    questions::{
        dto::{AssignRequest, QuestionAnswerPatch, RecordingUploaded},
        repo_types::QuestionAnswer,
        services,
    },
    state::AppState,
};

pub fn question_routes(max_upload_bytes: usize) -> Router<AppState> {
    let uploads = Router::new()
        .route(
            "/upload_answer/:user_id/:interview_id/:question_id/:recording_type",
            post(upload_typed_recording),
        )
        .route(
            "/upload_answer/:user_id/:interview_id/:question_id",
            post(upload_recording_untyped),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/start_interview", post(start_interview))
        .route("/more_questions", post(more_questions))
        .route("/questions/:user_id/:interview_id", get(list_questions))
        .route("/question/:qa_id", patch(update_question))
        .merge(uploads)
}

#[instrument(skip(state))]
pub async fn start_interview(
    State(state): State<AppState>,
    Json(payload): Json<AssignRequest>,
) -> Result<Json<Vec<QuestionAnswer>>, AppError> {
    let created = services::start(&state.db, payload.user_id, payload.interview_id).await?;
    Ok(Json(created))
}

#[instrument(skip(state))]
pub async fn more_questions(
    State(state): State<AppState>,
    Json(payload): Json<AssignRequest>,
) -> Result<Json<Vec<QuestionAnswer>>, AppError> {
    let created = services::more(&state.db, payload.user_id, payload.interview_id).await?;
    Ok(Json(created))
}

#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
    Path((user_id, interview_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<QuestionAnswer>>, AppError> {
    Ok(Json(services::list(&state.db, user_id, interview_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_question(
    State(state): State<AppState>,
    Path(qa_id): Path<i64>,
    Json(payload): Json<QuestionAnswerPatch>,
) -> Result<Json<QuestionAnswer>, AppError> {
    let updated = services::update(&state.db, qa_id, payload)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::NotFound(_)) {
                warn!(qa_id, "update of unknown question answer");
            }
        })?;
    Ok(Json(updated))
}

#[instrument(skip(state, mp))]
pub async fn upload_typed_recording(
    State(state): State<AppState>,
    Path((user_id, interview_id, question_id, recording_type)): Path<(i64, i64, i32, String)>,
    mut mp: Multipart,
) -> Result<Json<RecordingUploaded>, AppError> {
    let kind = recording_type
        .parse::<RecordingKind>()
        .inspect_err(|_| warn!(recording_type = %recording_type, "invalid recording type"))?;
    let item = read_upload(&mut mp).await?;
    let path = upload_recording(
        state.storage.as_ref(),
        user_id,
        interview_id,
        question_id,
        Some(kind),
        item,
    )
    .await?;
    Ok(Json(RecordingUploaded { path }))
}

#[instrument(skip(state, mp))]
pub async fn upload_recording_untyped(
    State(state): State<AppState>,
    Path((user_id, interview_id, question_id)): Path<(i64, i64, i32)>,
    mut mp: Multipart,
) -> Result<Json<RecordingUploaded>, AppError> {
    let item = read_upload(&mut mp).await?;
    let path = upload_recording(
        state.storage.as_ref(),
        user_id,
        interview_id,
        question_id,
        None,
        item,
    )
    .await?;
    Ok(Json(RecordingUploaded { path }))
}
