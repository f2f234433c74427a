use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{
    auth::User,
    error::AppError,
    files::{
        kinds::DocumentKind,
        services::{self, sanitize_file_name, UploadItem},
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct DocumentUploaded {
    pub filename: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub detail: &'static str,
    pub count: usize,
}

pub fn file_routes(max_upload_bytes: usize) -> Router<AppState> {
    let uploads = Router::new()
        .route("/upload/:user_id/:file_type", post(upload_document))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .merge(uploads)
        .route("/preview/:user_id/:file_type", get(preview_document))
        .route("/delete/:user_id/:file_type", delete(delete_documents))
}

/// Pulls the `file` field out of a multipart body.
pub(crate) async fn read_upload(mp: &mut Multipart) -> Result<UploadItem, AppError> {
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::invalid(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = sanitize_file_name(field.file_name().unwrap_or_default())?;
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| services::content_type_for(&file_name).to_string());
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::invalid(e.body_text()))?;
        return Ok(UploadItem {
            file_name,
            body,
            content_type,
        });
    }
    Err(AppError::invalid("multipart field `file` is required"))
}

#[instrument(skip(state, mp))]
pub async fn upload_document(
    State(state): State<AppState>,
    Path((user_id, file_type)): Path<(i64, String)>,
    mut mp: Multipart,
) -> Result<Json<DocumentUploaded>, AppError> {
    let kind = file_type
        .parse::<DocumentKind>()
        .inspect_err(|_| warn!(user_id, file_type = %file_type, "invalid file type"))?;
    let item = read_upload(&mut mp).await?;
    let filename = item.file_name.clone();

    let path = services::upload_document(state.storage.as_ref(), user_id, kind, item).await?;

    if !User::set_document_path(&state.db, user_id, kind, &path).await? {
        warn!(user_id, path = %path, "document stored for unknown user");
    }

    Ok(Json(DocumentUploaded { filename, path }))
}

#[instrument(skip(state))]
pub async fn preview_document(
    State(state): State<AppState>,
    Path((user_id, file_type)): Path<(i64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = file_type.parse::<DocumentKind>()?;
    let file = services::preview_document(state.storage.as_ref(), user_id, kind).await?;

    let disposition = format!("inline; filename=\"{}\"", header_safe(&file.file_name));
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    ))
}

/// Header values must be visible ASCII.
fn header_safe(name: &str) -> String {
    name.chars()
        .filter(|c| (c.is_ascii_graphic() && *c != '"') || *c == ' ')
        .collect()
}

#[instrument(skip(state))]
pub async fn delete_documents(
    State(state): State<AppState>,
    Path((user_id, file_type)): Path<(i64, String)>,
) -> Result<Json<Deleted>, AppError> {
    let kind = file_type.parse::<DocumentKind>()?;
    let count = services::delete_documents(state.storage.as_ref(), user_id, kind).await?;
    Ok(Json(Deleted {
        detail: "File deleted",
        count,
    }))
}
