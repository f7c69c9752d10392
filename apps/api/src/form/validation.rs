use serde::{Deserialize, Serialize};

use crate::session::models::{ContractData, Currency, TemplateStyle};

/// Required fields in display order, with the labels used in error messages.
pub const REQUIRED_FIELDS: [(&str, &str); 5] = [
    ("party1", "Party 1 Name"),
    ("party2", "Party 2 Name"),
    ("commodity", "Commodity Description"),
    ("quantity", "Quantity"),
    ("price", "Price per unit"),
];

/// Body of a form submission. Every field may be omitted; omitted required
/// fields are reported as missing, omitted optional fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractForm {
    pub party1: String,
    pub party2: String,
    pub commodity: String,
    pub quantity: u64,
    pub price: f64,
    pub currency: Currency,
    pub template: TemplateStyle,
}

impl ContractForm {
    /// Pre-fills the form from previously submitted session data.
    pub fn from_contract_data(data: &ContractData) -> Self {
        Self {
            party1: data.party1.clone().unwrap_or_default(),
            party2: data.party2.clone().unwrap_or_default(),
            commodity: data.commodity.clone().unwrap_or_default(),
            quantity: data.quantity.unwrap_or_default(),
            price: data.price.unwrap_or_default(),
            currency: data.currency,
            template: data.template,
        }
    }

    /// Whether the named required field holds a usable value.
    fn is_present(&self, field: &str) -> bool {
        match field {
            "party1" => !self.party1.trim().is_empty(),
            "party2" => !self.party2.trim().is_empty(),
            "commodity" => !self.commodity.trim().is_empty(),
            "quantity" => self.quantity > 0,
            "price" => self.price > 0.0,
            _ => true,
        }
    }

    /// Returns the labels of required fields that are empty or zero, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .filter(|(field, _)| !self.is_present(field))
            .map(|(_, label)| *label)
            .collect()
    }

    /// Writes the submitted values into the session's contract data.
    /// `extracted_text` is left as it was.
    pub fn merge_into(self, data: &mut ContractData) {
        data.party1 = Some(self.party1.trim().to_string());
        data.party2 = Some(self.party2.trim().to_string());
        data.commodity = Some(self.commodity.trim().to_string());
        data.quantity = Some(self.quantity);
        data.price = Some(self.price);
        data.currency = self.currency;
        data.template = self.template;
    }
}
