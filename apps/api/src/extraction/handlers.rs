use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::AppPath;
use crate::extraction::{extract_document, preview, DocumentKind};
use crate::session::machine::require_step;
use crate::session::models::{SessionView, Step};
use crate::state::AppState;

/// Name of the multipart field carrying the document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub kind: DocumentKind,
    pub characters: usize,
    pub preview: String,
    pub session: SessionView,
}

struct UploadedFile {
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/sessions/:id/upload
///
/// Extracts text from the uploaded document and stores it in the session.
/// The wizard stays on `upload`; the client navigates to `form` when ready.
pub async fn handle_upload(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    state
        .sessions
        .update(session_id, |session| {
            require_step(session, Step::Upload)?;
            Ok(())
        })
        .await?;

    let upload = read_upload(&mut multipart).await?;
    let kind = DocumentKind::detect(upload.content_type.as_deref(), upload.filename.as_deref());
    info!(
        "Session {session_id}: extracting {:?} ({} bytes) as {kind:?}",
        upload.filename,
        upload.bytes.len()
    );

    let text = extract_document(kind.clone(), upload.bytes).await?;
    let characters = text.chars().count();
    let preview = preview(&text);

    let view = state
        .sessions
        .update(session_id, |session| {
            require_step(session, Step::Upload)?;
            session.contract_data.extracted_text = Some(text);
            Ok(session.view())
        })
        .await?;

    info!("Session {session_id}: extracted {characters} characters");

    Ok(Json(UploadResponse {
        filename: upload.filename,
        kind,
        characters,
        preview,
        session: view,
    }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}
