use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// A named interview session owned by a user. Immutable once created.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Interview {
    pub id: i64,
    pub user_id: i64,
    pub interview_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
