use sqlx::PgPool;

use crate::performance::dto::InterviewSummary;

/// Every interview owned by `user_id`, newest first, with per-interview aggregates.
pub async fn list_summaries(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<InterviewSummary>> {
    sqlx::query_as::<_, InterviewSummary>(
        r#"
        SELECT i.id, i.user_id, i.interview_name, i.created_at,
               COUNT(q.id) AS question_count,
               AVG(q.candidate_score) AS average_score
          FROM interviews i
          LEFT JOIN question_answers q ON q.interview_id = i.id
         WHERE i.user_id = $1
         GROUP BY i.id
         ORDER BY i.created_at DESC, i.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_summary(db: &PgPool, interview_id: i64) -> sqlx::Result<Option<InterviewSummary>> {
    sqlx::query_as::<_, InterviewSummary>(
        r#"
        SELECT i.id, i.user_id, i.interview_name, i.created_at,
               COUNT(q.id) AS question_count,
               AVG(q.candidate_score) AS average_score
          FROM interviews i
          LEFT JOIN question_answers q ON q.interview_id = i.id
         WHERE i.id = $1
         GROUP BY i.id
        "#,
    )
    .bind(interview_id)
    .fetch_optional(db)
    .await
}
