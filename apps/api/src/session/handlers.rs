use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::session::machine::{navigate, Navigation};
use crate::session::models::SessionView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub to: Navigation,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create().await;
    info!("Session {} started", session.id);
    (StatusCode::CREATED, Json(session.view()))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("Session {session_id} not found")));
    }
    info!("Session {session_id} ended");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
    AppJson(req): AppJson<NavigateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            let from = session.step;
            let to = navigate(session, req.to)?;
            info!("Session {session_id}: {from} -> {to}");
            Ok(session.view())
        })
        .await?;
    Ok(Json(view))
}
