// Prompt constants for contract generation.

/// System message sent with every generation request.
pub const CONTRACT_SYSTEM: &str =
    "You are a legal document generator specializing in commercial contracts.";

/// Contract prompt template.
/// Replace: {party1}, {party2}, {commodity}, {quantity}, {price}, {currency}, {template}
pub const CONTRACT_PROMPT_TEMPLATE: &str = r#"Generate a legal contract based on the following information:

PARTIES:
- Party 1: {party1}
- Party 2: {party2}

TERMS:
- Commodity: {commodity}
- Quantity: {quantity}
- Price: {price} {currency} per unit
- Template Style: {template}

Please generate a complete, professionally formatted, and legally binding contract.
Include standard clauses for dispute resolution, termination, and force majeure."#;
