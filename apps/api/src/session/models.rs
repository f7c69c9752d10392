use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four screens of the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Home,
    Upload,
    Form,
    Generate,
}

impl Step {
    /// Breadcrumb label shown in the navigation sidebar.
    pub fn label(self) -> &'static str {
        match self {
            Step::Home => "Home",
            Step::Upload => "Upload",
            Step::Form => "Form",
            Step::Generate => "Generate",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::Home => "home",
            Step::Upload => "upload",
            Step::Form => "form",
            Step::Generate => "generate",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        };
        f.write_str(s)
    }
}

/// Drafting style the model is asked to follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateStyle {
    #[default]
    London,
    Chicago,
    Dubai,
}

impl fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TemplateStyle::London => "London",
            TemplateStyle::Chicago => "Chicago",
            TemplateStyle::Dubai => "Dubai",
        };
        f.write_str(s)
    }
}

/// Everything collected for the contract so far.
///
/// Form fields are `None` until the form has been submitted successfully;
/// `extracted_text` is set by a successful upload and is never echoed back in
/// session views; the upload response carries its preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContractData {
    pub party1: Option<String>,
    pub party2: Option<String>,
    pub commodity: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<f64>,
    pub currency: Currency,
    pub template: TemplateStyle,
    #[serde(skip_serializing)]
    pub extracted_text: Option<String>,
}

/// Per-user wizard context. Owned by the session store and handed to each step handler.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub step: Step,
    pub contract_data: ContractData,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            step: Step::Home,
            contract_data: ContractData::default(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            step: self.step,
            step_label: self.step.label(),
            contract_data: self.contract_data.clone(),
            has_extracted_text: self.contract_data.extracted_text.is_some(),
            created_at: self.created_at,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of a session returned by every session endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub step: Step,
    pub step_label: &'static str,
    pub contract_data: ContractData,
    pub has_extracted_text: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_home_with_defaults() {
        let session = Session::new();
        assert_eq!(session.step, Step::Home);
        assert_eq!(session.contract_data.currency, Currency::Usd);
        assert_eq!(session.contract_data.template, TemplateStyle::London);
        assert!(session.contract_data.party1.is_none());
    }

    #[test]
    fn test_step_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Step::Generate).unwrap(), "\"generate\"");
        let step: Step = serde_json::from_str("\"upload\"").unwrap();
        assert_eq!(step, Step::Upload);
    }

    #[test]
    fn test_currency_and_template_wire_names() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        let template: TemplateStyle = serde_json::from_str("\"Dubai\"").unwrap();
        assert_eq!(template, TemplateStyle::Dubai);
        assert!(serde_json::from_str::<Currency>("\"JPY\"").is_err());
    }

    #[test]
    fn test_view_hides_extracted_text_flag_until_upload() {
        let mut session = Session::new();
        assert!(!session.view().has_extracted_text);
        session.contract_data.extracted_text = Some("text".to_string());
        let view = session.view();
        assert!(view.has_extracted_text);
        assert_eq!(view.step_label, "Home");
    }
}
