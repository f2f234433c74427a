use crate::auth::repo_types::User;
use crate::files::DocumentKind;
use sqlx::PgPool;

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, user_type, jd_path, resume_path, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, user_type, jd_path, resume_path, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user. Document paths start out unset.
    pub async fn create(
        db: &PgPool,
        username: &str,
        password: &str,
        user_type: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, user_type)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, user_type, jd_path, resume_path, created_at
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(user_type)
        .fetch_one(db)
        .await
    }

    /// Point the user's jd/resume column at `path`. Returns false when no such user exists.
    pub async fn set_document_path(
        db: &PgPool,
        user_id: i64,
        kind: DocumentKind,
        path: &str,
    ) -> sqlx::Result<bool> {
        let sql = match kind {
            DocumentKind::Jd => "UPDATE users SET jd_path = $1 WHERE id = $2",
            DocumentKind::Resume => "UPDATE users SET resume_path = $1 WHERE id = $2",
        };
        let res = sqlx::query(sql).bind(path).bind(user_id).execute(db).await?;
        Ok(res.rows_affected() > 0)
    }
}
