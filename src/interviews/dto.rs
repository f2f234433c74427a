use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub user_id: i64,
    pub interview_name: String,
}
