//! Request extractors whose rejections use the `AppError` JSON envelope.
//!
//! axum's own `Json` and `Path` reject with a plain-text body; these wrappers
//! route the same failures through [`AppError::Validation`] instead.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::errors::AppError;

/// JSON body extractor. Malformed JSON, a wrong content type, or a value that
/// does not fit the target type (negative quantity, unknown currency or step)
/// becomes a 400 `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path extractor. A session id that is not a UUID becomes a 400 `VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
