use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::llm_client::LlmError;
use crate::session::machine::TransitionError;

/// Message shown to the user for any generation failure. Detail stays in the logs.
pub const GENERATION_FAILED_MESSAGE: &str =
    "An error occurred while generating the contract. Please try again or contact support.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Error processing file: {0}")]
    Extraction(#[from] ExtractError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingFields(labels) => {
                details = Some(json!({ "missing_fields": labels }));
                (StatusCode::BAD_REQUEST, "MISSING_FIELDS", self.to_string())
            }
            AppError::Transition(e) => (StatusCode::CONFLICT, "INVALID_TRANSITION", e.to_string()),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction failed: {e}");
                let code = match e {
                    ExtractError::Unsupported(_) => "UNSUPPORTED_FILE_TYPE",
                    ExtractError::Encoding(_) => "ENCODING_ERROR",
                    ExtractError::Empty => "EMPTY_DOCUMENT",
                    ExtractError::Pdf(_) | ExtractError::Docx(_) => "PARSE_ERROR",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, self.to_string())
            }
            AppError::Llm(e) => {
                tracing::error!("Error generating contract: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    GENERATION_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::NotImplemented(what) => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                format!("{what} is not available yet"),
            ),
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_labels() {
        let err = AppError::MissingFields(vec!["Party 1 Name", "Quantity"]);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Party 1 Name, Quantity"
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::MissingFields(vec!["Quantity"]), StatusCode::BAD_REQUEST),
            (
                AppError::Transition(TransitionError::NoExtractedText),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Extraction(ExtractError::Unsupported("image/png".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Llm(LlmError::MissingApiKey), StatusCode::BAD_GATEWAY),
            (AppError::NotImplemented("PDF export"), StatusCode::NOT_IMPLEMENTED),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
