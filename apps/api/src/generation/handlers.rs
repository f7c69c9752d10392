//! Axum route handlers for contract generation and download.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::generation::generator::{download_filename, generate_contract, GeneratedContract};
use crate::session::machine::require_step;
use crate::session::models::{SessionView, Step};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub contract: GeneratedContract,
    /// PDF export is declared but not implemented.
    pub pdf_export_available: bool,
    pub session: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub text: String,
}

/// POST /api/v1/sessions/:id/generate
///
/// Generates the contract from the session's data. The session stays on
/// `generate` whether or not the call succeeds, so the user can retry.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state
        .sessions
        .update(session_id, |session| {
            require_step(session, Step::Generate)?;
            Ok(session.clone())
        })
        .await?;

    // No lock is held while the request is in flight. The response is built
    // from the snapshot so a session ended mid-call still gets its contract.
    let contract = generate_contract(state.completion.as_ref(), &session.contract_data).await?;

    Ok(Json(GenerateResponse {
        contract,
        pdf_export_available: false,
        session: session.view(),
    }))
}

/// POST /api/v1/contracts/download
///
/// Returns the given contract text as a timestamped plain-text attachment.
pub async fn handle_download(
    AppJson(req): AppJson<DownloadRequest>,
) -> Result<Response, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let filename = download_filename(&Local::now());
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, req.text).into_response())
}

/// POST /api/v1/contracts/download/pdf
pub async fn handle_download_pdf() -> Result<Response, AppError> {
    Err(AppError::NotImplemented("PDF export"))
}
