use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::questions::QuestionAnswer;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InterviewSummary {
    pub id: i64,
    pub user_id: i64,
    pub interview_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub question_count: i64,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterviewStats {
    pub total: usize,
    pub attempted: usize, // status moved past NEW
    pub scored: usize,
    pub graded: usize,
    pub average_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct InterviewDetails {
    pub interview: InterviewSummary,
    pub questions: Vec<QuestionAnswer>,
    pub stats: InterviewStats,
}
