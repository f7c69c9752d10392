pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::form::handlers as form;
use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/navigate",
            post(session::handle_navigate),
        )
        .route(
            "/api/v1/sessions/:id/upload",
            post(extraction::handle_upload).layer(upload_limit),
        )
        .route(
            "/api/v1/sessions/:id/form",
            get(form::handle_get_form).post(form::handle_submit_form),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        // Downloads
        .route("/api/v1/contracts/download", post(generation::handle_download))
        .route(
            "/api/v1/contracts/download/pdf",
            post(generation::handle_download_pdf),
        )
        .with_state(state)
}
