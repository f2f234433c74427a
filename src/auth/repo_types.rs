use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,            // stored verbatim, see services::check_login
    pub user_type: String,           // "candidate", "interviewer", ...
    pub jd_path: Option<String>,     // current job description blob key
    pub resume_path: Option<String>, // current resume blob key
    pub created_at: OffsetDateTime,
}
