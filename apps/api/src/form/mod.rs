// Contract form: payload, required-field checks, submit handler.
// Checks are presence-only; the model is trusted with everything else.

pub mod handlers;
pub mod validation;
