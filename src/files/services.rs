use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tracing::info;

use crate::error::AppError;
use crate::files::kinds::{DocumentKind, RecordingKind};
use crate::storage::StorageClient;

const DOCUMENTS_ROOT: &str = "uploads/jd_resume";
const RECORDINGS_ROOT: &str = "uploads";

/// One file taken out of a multipart upload.
pub struct UploadItem {
    pub file_name: String,
    pub body: Bytes,
    pub content_type: String,
}

/// A stored document ready to be sent back to the client.
#[derive(Debug)]
pub struct StoredFile {
    pub file_name: String,
    pub body: Bytes,
    pub content_type: &'static str,
}

/// Keeps only the final path component of a client-supplied file name.
pub fn sanitize_file_name(raw: &str) -> Result<String, AppError> {
    let normalized = raw.replace('\\', "/");
    let name = Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::trim)
        .unwrap_or("");
    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::invalid("Uploaded file must have a file name"));
    }
    Ok(name.to_string())
}

pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain; charset=utf-8",
        Some("webm") => "video/webm",
        Some("mp4") => "video/mp4",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

fn document_dir(user_id: i64) -> String {
    format!("{DOCUMENTS_ROOT}/{user_id}")
}

fn matching(names: &[String], kind: DocumentKind) -> Vec<&String> {
    let prefix = kind.file_prefix();
    names.iter().filter(|n| n.starts_with(&prefix)).collect()
}

/// Stores a jd/resume document, replacing any earlier file of the same kind.
/// Returns the new blob key.
///
/// Concurrent uploads of the same kind for one user are not serialized.
pub async fn upload_document(
    storage: &dyn StorageClient,
    user_id: i64,
    kind: DocumentKind,
    item: UploadItem,
) -> Result<String, AppError> {
    let dir = document_dir(user_id);

    if let Some(names) = storage.list_dir(&dir).await? {
        for old in matching(&names, kind) {
            let key = format!("{dir}/{old}");
            storage.delete_object(&key).await?;
            info!(user_id, kind = %kind, key = %key, "replaced previous document");
        }
    }

    let key = format!("{dir}/{}{}", kind.file_prefix(), item.file_name);
    storage
        .put_object(&key, item.body, &item.content_type)
        .await
        .with_context(|| format!("store document {key}"))?;
    info!(user_id, kind = %kind, key = %key, "document saved");
    Ok(key)
}

/// Stores an answer recording. Earlier recordings are kept.
pub async fn upload_recording(
    storage: &dyn StorageClient,
    user_id: i64,
    interview_id: i64,
    question_id: i32,
    kind: Option<RecordingKind>,
    item: UploadItem,
) -> Result<String, AppError> {
    let key = match kind {
        Some(k) => format!(
            "{RECORDINGS_ROOT}/{user_id}/{interview_id}/{question_id}_{k}_{}",
            item.file_name
        ),
        None => format!(
            "{RECORDINGS_ROOT}/{user_id}/{interview_id}/{question_id}_{}",
            item.file_name
        ),
    };
    storage
        .put_object(&key, item.body, &item.content_type)
        .await
        .with_context(|| format!("store recording {key}"))?;
    info!(
        user_id,
        interview_id,
        question_id,
        kind = kind.map(RecordingKind::as_str).unwrap_or("untyped"),
        key = %key,
        "recording saved"
    );
    Ok(key)
}

/// The user's current document of `kind`.
pub async fn preview_document(
    storage: &dyn StorageClient,
    user_id: i64,
    kind: DocumentKind,
) -> Result<StoredFile, AppError> {
    let dir = document_dir(user_id);
    let names = storage
        .list_dir(&dir)
        .await?
        .ok_or_else(|| AppError::not_found("No files found"))?;
    let name = matching(&names, kind)
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("File not found"))?;

    let body = storage
        .get_object(&format!("{dir}/{name}"))
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))?;
    Ok(StoredFile {
        content_type: content_type_for(name),
        file_name: name.clone(),
        body,
    })
}

/// Removes every stored file of `kind`; returns how many were removed.
pub async fn delete_documents(
    storage: &dyn StorageClient,
    user_id: i64,
    kind: DocumentKind,
) -> Result<usize, AppError> {
    let dir = document_dir(user_id);
    let names = storage
        .list_dir(&dir)
        .await?
        .ok_or_else(|| AppError::not_found("No files found"))?;
    let doomed = matching(&names, kind);
    if doomed.is_empty() {
        return Err(AppError::not_found("File not found"));
    }
    for name in &doomed {
        storage.delete_object(&format!("{dir}/{name}")).await?;
    }
    info!(user_id, kind = %kind, count = doomed.len(), "documents deleted");
    Ok(doomed.len())
}
