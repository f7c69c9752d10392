//! Contract generation: turns validated contract data into one completion request.
//!
//! Flow: session data → form values (re-checked) → prompt → completion client →
//!       trimmed contract text + download filename.
//!
//! The generated text is returned to the caller only; it is never stored.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::form::validation::ContractForm;
use crate::generation::prompts::{CONTRACT_PROMPT_TEMPLATE, CONTRACT_SYSTEM};
use crate::llm_client::{CompletionClient, CompletionRequest};
use crate::session::models::ContractData;

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContract {
    pub text: String,
    pub filename: String,
    pub model: &'static str,
    pub generated_at: DateTime<Local>,
}

/// Renders a price with at least one decimal place: `5` → `5.0`, `5.25` → `5.25`.
pub fn format_price(price: f64) -> String {
    if price.is_finite() && price.fract() == 0.0 {
        format!("{price:.1}")
    } else {
        price.to_string()
    }
}

/// Fills the contract template from the form values.
pub fn build_prompt(form: &ContractForm) -> String {
    render_template(CONTRACT_PROMPT_TEMPLATE, |name| {
        let value = match name {
            "party1" => form.party1.trim().to_string(),
            "party2" => form.party2.trim().to_string(),
            "commodity" => form.commodity.trim().to_string(),
            "quantity" => form.quantity.to_string(),
            "price" => format_price(form.price),
            "currency" => form.currency.to_string(),
            "template" => form.template.to_string(),
            _ => return None,
        };
        Some(value)
    })
}

/// Substitutes `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are copied verbatim and never scanned again, so a value
/// containing `{party2}` stays literal. Unknown placeholders are kept as written.
fn render_template<F>(template: &str, value_for: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        match value_for(&tail[1..close]) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Builds the completion request for the session's contract data.
///
/// The form was validated on the way into `generate`, but the required fields
/// are checked again so a prompt is never built from blanks.
pub fn completion_request(data: &ContractData) -> Result<CompletionRequest, AppError> {
    let form = ContractForm::from_contract_data(data);
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }
    Ok(CompletionRequest::new(CONTRACT_SYSTEM, build_prompt(&form)))
}

/// `contract_<YYYYMMDD_HHMMSS>.txt` for the given instant.
pub fn download_filename<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("contract_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Sends one completion request. Failures are returned as `AppError::Llm`;
/// there is no retry.
pub async fn generate_contract(
    client: &dyn CompletionClient,
    data: &ContractData,
) -> Result<GeneratedContract, AppError> {
    let request = completion_request(data)?;

    let text = client.complete(&request).await?;
    let generated_at = Local::now();

    info!(
        "Contract generated: {} characters (model {})",
        text.chars().count(),
        request.model
    );

    Ok(GeneratedContract {
        filename: download_filename(&generated_at),
        text,
        model: request.model,
        generated_at,
    })
}
