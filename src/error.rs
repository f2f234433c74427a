use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Request-scoped failure. Every variant is local to one request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Maps a unique violation to `Conflict(msg)`, passing other errors through.
    pub fn conflict_on_unique(e: sqlx::Error, msg: &str) -> Self {
        if db_code(&e).as_deref() == Some(PG_UNIQUE_VIOLATION) {
            return Self::Conflict(msg.into());
        }
        Self::Database(e)
    }

    /// Maps a foreign-key violation to `NotFound(msg)`, passing other errors through.
    pub fn not_found_on_fk(e: sqlx::Error, msg: &str) -> Self {
        if db_code(&e).as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) {
            return Self::NotFound(msg.into());
        }
        Self::Database(e)
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Invalid credentials".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "A database error occurred".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

fn db_code(e: &sqlx::Error) -> Option<String> {
    match e {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!(error = %e, "database error"),
            AppError::Internal(e) => tracing::error!(error = ?e, "internal error"),
            _ => {}
        }

        let (status, code, message) = self.parts();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    use sqlx::error::{DatabaseError, ErrorKind};

    #[derive(Debug)]
    struct PgFailure(&'static str);

    impl std::fmt::Display for PgFailure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "postgres error {}", self.0)
        }
    }

    impl std::error::Error for PgFailure {}

    impl DatabaseError for PgFailure {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                PG_UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                PG_FOREIGN_KEY_VIOLATION => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn pg(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgFailure(code)))
    }

    #[test]
    fn semantic_errors_map_to_status_codes() {
        let cases = [
            (AppError::Conflict("taken".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (AppError::invalid("bad"), StatusCode::BAD_REQUEST),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn body_carries_code_and_message() {
        let res = AppError::not_found("Interview not found").into_response();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Interview not found");
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let res = AppError::Internal(anyhow::anyhow!("disk on fire")).into_response();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("disk on fire"));
    }

    #[test]
    fn non_database_errors_pass_through_mappers() {
        let err = AppError::conflict_on_unique(sqlx::Error::RowNotFound, "taken");
        assert!(matches!(err, AppError::Database(_)));
        let err = AppError::not_found_on_fk(sqlx::Error::PoolTimedOut, "missing");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err = AppError::conflict_on_unique(pg(PG_UNIQUE_VIOLATION), "Username already registered");
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Username already registered"));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);

        let err = AppError::conflict_on_unique(pg(PG_FOREIGN_KEY_VIOLATION), "taken");
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn foreign_key_violation_becomes_not_found() {
        let err = AppError::not_found_on_fk(pg(PG_FOREIGN_KEY_VIOLATION), "User not found");
        assert!(matches!(err, AppError::NotFound(ref m) if m == "User not found"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AppError::not_found_on_fk(pg(PG_UNIQUE_VIOLATION), "missing");
        assert!(matches!(err, AppError::Database(_)));
    }
}
