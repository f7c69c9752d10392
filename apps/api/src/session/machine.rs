//! Wizard navigation.
//!
//! Transition table:
//!
//! | from     | request  | to       | condition                    |
//! |----------|----------|----------|------------------------------|
//! | home     | upload   | upload   |                              |
//! | home     | form     | form     |                              |
//! | upload   | form     | form     | extracted text is present    |
//! | upload   | back     | home     |                              |
//! | form     | back     | home     |                              |
//! | generate | back     | form     |                              |
//! | any      | home     | home     |                              |
//!
//! `form → generate` is not a navigation: it happens only through a
//! successful form submission (see [`advance_to_generate`]).
//! No transition touches `contract_data`.

use serde::Deserialize;
use thiserror::Error;

use crate::session::models::{Session, Step};

/// A user navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Upload,
    Form,
    Back,
    Home,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot navigate '{requested:?}' from step '{from}'")]
    NotAllowed { from: Step, requested: Navigation },

    #[error("Upload a document before continuing to the form")]
    NoExtractedText,

    #[error("This action requires step '{expected}' but the session is at '{actual}'")]
    WrongStep { expected: Step, actual: Step },
}

/// Computes the target step for a navigation request without mutating anything.
pub fn next_step(session: &Session, nav: Navigation) -> Result<Step, TransitionError> {
    let from = session.step;
    match (from, nav) {
        (_, Navigation::Home) => Ok(Step::Home),
        (Step::Home, Navigation::Upload) => Ok(Step::Upload),
        (Step::Home, Navigation::Form) => Ok(Step::Form),
        (Step::Upload, Navigation::Form) => {
            if session.contract_data.extracted_text.is_some() {
                Ok(Step::Form)
            } else {
                Err(TransitionError::NoExtractedText)
            }
        }
        (Step::Upload, Navigation::Back) | (Step::Form, Navigation::Back) => Ok(Step::Home),
        (Step::Generate, Navigation::Back) => Ok(Step::Form),
        (from, requested) => Err(TransitionError::NotAllowed { from, requested }),
    }
}

/// Applies a navigation request. On error the session is unchanged.
pub fn navigate(session: &mut Session, nav: Navigation) -> Result<Step, TransitionError> {
    let to = next_step(session, nav)?;
    session.step = to;
    Ok(to)
}

/// Guards step-specific actions (upload, form submit, generate).
pub fn require_step(session: &Session, expected: Step) -> Result<(), TransitionError> {
    if session.step == expected {
        Ok(())
    } else {
        Err(TransitionError::WrongStep {
            expected,
            actual: session.step,
        })
    }
}

/// The `form → generate` edge, taken after the form validated.
pub fn advance_to_generate(session: &mut Session) -> Result<(), TransitionError> {
    require_step(session, Step::Form)?;
    session.step = Step::Generate;
    Ok(())
}
