use std::net::SocketAddr;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{auth, files, interviews, performance, questions};

pub fn build_app(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    // Served both at the root and under /api/interview.
    let interview_routes = || {
        Router::new()
            .merge(interviews::router())
            .merge(questions::router(max_upload))
    };

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(|| async { "ok" }))
        .merge(auth::router())
        .merge(interview_routes())
        .nest("/api/interview", interview_routes())
        .nest("/api/files", files::router(max_upload))
        .nest("/api/performance", performance::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the AI Interviewer API" }))
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use bytes::Bytes;
    use tower::ServiceExt;

    use crate::storage::{LocalStorage, StorageClient};

    const BOUNDARY: &str = "X-INTERVIEWER-BOUNDARY";

    fn app_with(dir: &tempfile::TempDir) -> (Router, Arc<dyn StorageClient>) {
        let storage = Arc::new(LocalStorage::new(dir.path())) as Arc<dyn StorageClient>;
        (build_app(AppState::fake(storage.clone())), storage)
    }

    fn multipart(uri: &str, file_name: &str, body: &str) -> Request<Body> {
        let payload = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {body}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(payload))
            .unwrap()
    }

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(res: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_and_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let res = app.clone().oneshot(empty("GET", "/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app.oneshot(empty("GET", "/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await["message"],
            "Welcome to the AI Interviewer API"
        );
    }

    #[tokio::test]
    async fn upload_rejects_unknown_file_type() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let res = app
            .oneshot(multipart("/api/files/upload/7/photo", "me.png", "png"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn preview_and_delete_missing_files_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let res = app
            .clone()
            .oneshot(empty("GET", "/api/files/preview/7/jd"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .oneshot(empty("DELETE", "/api/files/delete/7/resume"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn preview_returns_raw_bytes_then_delete_removes_them() {
        let dir = tempfile::tempdir().unwrap();
        let (app, storage) = app_with(&dir);
        storage
            .put_object(
                "uploads/jd_resume/7/jd_role.pdf",
                Bytes::from_static(b"%PDF-1.7 role"),
                "application/pdf",
            )
            .await
            .unwrap();

        let res = app
            .clone()
            .oneshot(empty("GET", "/api/files/preview/7/jd"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/pdf");
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.7 role");

        let res = app
            .clone()
            .oneshot(empty("DELETE", "/api/files/delete/7/jd"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["count"], 1);

        let res = app
            .oneshot(empty("GET", "/api/files/preview/7/jd"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn typed_recording_upload_is_stored_under_both_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let (app, storage) = app_with(&dir);

        let res = app
            .clone()
            .oneshot(multipart("/upload_answer/7/42/1/audio", "a.webm", "AUDIO"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["path"], "uploads/7/42/1_audio_a.webm");

        let res = app
            .oneshot(multipart("/api/interview/upload_answer/7/42/2", "b.webm", "RAW"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["path"], "uploads/7/42/2_b.webm");

        let stored = storage.get_object("uploads/7/42/1_audio_a.webm").await.unwrap();
        assert_eq!(stored.as_deref(), Some(&b"AUDIO"[..]));
    }

    #[tokio::test]
    async fn recording_upload_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let res = app
            .oneshot(multipart("/upload_answer/7/42/1/hologram", "a.webm", "x"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_without_file_field_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let payload = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
        );
        let req = Request::builder()
            .method("POST")
            .uri("/upload_answer/7/42/1/screen")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(payload))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn signup_validation_runs_before_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let req = Request::builder()
            .method("POST")
            .uri("/auth/signup")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"username":"a b","password":"pw","user_type":"candidate"}"#,
            ))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_interview_requires_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_with(&dir);

        let req = Request::builder()
            .method("POST")
            .uri("/api/interview/interview")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"user_id":7,"interview_name":"   "}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
