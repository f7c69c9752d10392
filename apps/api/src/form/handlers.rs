use axum::{
    extract::State,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::{AppJson, AppPath};
use crate::form::validation::ContractForm;
use crate::session::machine::{advance_to_generate, require_step};
use crate::session::models::{SessionView, Step};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/form
///
/// Current form values, pre-filled from earlier submissions.
pub async fn handle_get_form(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> Result<Json<ContractForm>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(ContractForm::from_contract_data(&session.contract_data)))
}

/// POST /api/v1/sessions/:id/form
///
/// Validates the required fields. On success the values are merged into the
/// session and the wizard advances to `generate`; otherwise nothing changes.
pub async fn handle_submit_form(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
    AppJson(form): AppJson<ContractForm>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(session_id, |session| {
            require_step(session, Step::Form)?;

            let missing = form.missing_fields();
            if !missing.is_empty() {
                return Err(AppError::MissingFields(missing));
            }

            form.merge_into(&mut session.contract_data);
            advance_to_generate(session)?;
            Ok(session.view())
        })
        .await?;

    info!("Session {session_id}: form accepted, advancing to generate");
    Ok(Json(view))
}
