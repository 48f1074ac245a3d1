use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Category, SignalSet};

/// One flat record decoded from a payload cell, in field order
pub type Record = serde_json::Map<String, Value>;

/// Text form of a field value as seen by the validators.
///
/// Strings pass through, null becomes empty, everything else uses its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Step of the redaction ladder that rewrote a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionRule {
    Phone,
    NationalId,
    Passport,
    PaymentHandle,
    Name,
    Email,
    Address,
    DeviceOrNetwork,
    AddressScrub,
}

impl RedactionRule {
    /// Category reported for a field rewritten by this rule
    pub fn category(self) -> Category {
        match self {
            RedactionRule::Phone => Category::Phone,
            RedactionRule::NationalId => Category::NationalId,
            RedactionRule::Passport => Category::Passport,
            RedactionRule::PaymentHandle => Category::PaymentHandle,
            RedactionRule::Name => Category::FullName,
            RedactionRule::Email => Category::Email,
            RedactionRule::Address | RedactionRule::AddressScrub => Category::Address,
            RedactionRule::DeviceOrNetwork => Category::DeviceId,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionInfo {
    pub field: String,
    pub rule: RedactionRule,
}

/// Outcome of scanning one record
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub is_pii: bool,
    /// A direct identifier (phone, national ID, passport, payment handle) was seen
    pub direct: bool,
    pub score: u8,
    pub signals: SignalSet,
    /// Redacted copy when `is_pii`, otherwise the input unchanged
    pub redacted: Record,
    pub redactions: Vec<RedactionInfo>,
}
