use serde::Serialize;
use sqlx::FromRow;

/// Per (user, interview, question) lifecycle record.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct QuestionAnswer {
    pub id: i64,
    pub user_id: i64,
    pub interview_id: i64,
    pub question_id: i32,      // id in QUESTION_BANK
    pub question_text: String, // copied from the bank at assignment time
    pub status: String,
    pub answer_text: Option<String>,
    pub camera_recording_path: Option<String>,
    pub screen_recording_path: Option<String>,
    pub audio_recording_path: Option<String>,
    pub combined_recording_path: Option<String>,
    pub ai_answer: Option<String>,
    pub ai_remark: Option<String>,
    pub candidate_score: Option<f64>,
    pub candidate_grade: Option<String>,
}
