use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    error::AppError,
    interviews::{dto::CreateInterviewRequest, repo_types::Interview},
    state::AppState,
};

pub fn interview_routes() -> Router<AppState> {
    Router::new().route("/interview", post(create_interview))
}

#[instrument(skip(state, payload))]
pub async fn create_interview(
    State(state): State<AppState>,
    Json(payload): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), AppError> {
    let name = payload.interview_name.trim();
    if name.is_empty() {
        return Err(AppError::invalid("interview_name must not be empty"));
    }

    let interview = Interview::create(&state.db, payload.user_id, name)
        .await
        .map_err(|e| AppError::not_found_on_fk(e, "User not found"))?;

    info!(
        interview_id = interview.id,
        user_id = interview.user_id,
        name = %interview.interview_name,
        "interview created"
    );
    Ok((StatusCode::CREATED, Json(interview)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn interview_serializes_rfc3339() {
        let interview = Interview {
            id: 42,
            user_id: 7,
            interview_name: "Backend loop".into(),
            created_at: datetime!(2025-03-01 09:30 UTC),
        };
        let v = serde_json::to_value(&interview).unwrap();
        assert_eq!(v["id"], 42);
        assert_eq!(v["created_at"], "2025-03-01T09:30:00Z");
    }

    #[test]
    fn request_requires_owner() {
        let err = serde_json::from_str::<CreateInterviewRequest>(r#"{"interview_name":"x"}"#);
        assert!(err.is_err());
    }
}
