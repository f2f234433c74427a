use sqlx::PgPool;

use crate::interviews::repo_types::Interview;

impl Interview {
    pub async fn create(db: &PgPool, user_id: i64, interview_name: &str) -> sqlx::Result<Interview> {
        sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews (user_id, interview_name)
            VALUES ($1, $2)
            RETURNING id, user_id, interview_name, created_at
            "#,
        )
        .bind(user_id)
        .bind(interview_name)
        .fetch_one(db)
        .await
    }
}
