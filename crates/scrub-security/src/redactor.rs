use scrub_core::{Category, Record, RedactionInfo, RedactionRule, SignalSet};
use serde_json::Value;

use crate::classifier::Field;
use crate::patterns::{self, REDACTED_MARKER};

const NAME_KEYS: &[Category] = &[Category::FullName, Category::GivenName, Category::FamilyName];
const LOCATION_KEYS: &[Category] = &[
    Category::Address,
    Category::City,
    Category::State,
    Category::PostalCode,
];
const DEVICE_KEYS: &[Category] = &[Category::DeviceId, Category::IpAddress];

/// One step of the redaction ladder
struct Rule {
    kind: RedactionRule,
    applies: fn(&Field<'_>, &SignalSet) -> bool,
    mask: fn(&Field<'_>) -> Value,
}

fn text(s: String) -> Value {
    Value::String(s)
}

/// Passport, payment handle, national ID, then phone, on the same string
fn scrub_chain(value: &str) -> String {
    let value = patterns::mask_passport(value);
    let value = patterns::mask_payment_handle(&value);
    let value = patterns::mask_national_id(&value);
    patterns::mask_phone(&value)
}

/// Rewrites the sensitive fields of a record flagged as PII
pub struct Redactor {
    rules: Vec<Rule>,
}

impl Redactor {
    pub fn new() -> Self {
        // First matching rule wins, so order is significant
        let rules = vec![
            Rule {
                kind: RedactionRule::Phone,
                applies: |f, _| f.is_valid(Category::Phone),
                mask: |f| text(patterns::mask_phone(&f.text)),
            },
            Rule {
                kind: RedactionRule::NationalId,
                applies: |f, _| f.is_valid(Category::NationalId),
                mask: |f| text(patterns::mask_national_id(&f.text)),
            },
            Rule {
                kind: RedactionRule::Passport,
                applies: |f, _| f.is_valid(Category::Passport),
                mask: |_| text(REDACTED_MARKER.to_string()),
            },
            Rule {
                kind: RedactionRule::PaymentHandle,
                applies: |f, _| f.is_valid(Category::PaymentHandle),
                mask: |f| text(patterns::mask_payment_handle(&f.text)),
            },
            Rule {
                kind: RedactionRule::Name,
                applies: |f, s| s.identity() && f.is_any(NAME_KEYS),
                mask: |f| text(patterns::mask_name(&f.text)),
            },
            Rule {
                kind: RedactionRule::Email,
                applies: |f, s| s.email() && f.is_valid(Category::Email),
                mask: |f| text(patterns::mask_email(&f.text)),
            },
            Rule {
                kind: RedactionRule::Address,
                applies: |f, s| s.address() && f.is_any(LOCATION_KEYS),
                // City, state and postal code stay in clear
                mask: |f| {
                    if f.is(Category::Address) {
                        text(patterns::mask_digits(&f.text))
                    } else {
                        f.value.clone()
                    }
                },
            },
            Rule {
                kind: RedactionRule::DeviceOrNetwork,
                applies: |f, s| s.device_or_network() && f.is_any(DEVICE_KEYS),
                mask: |_| text(REDACTED_MARKER.to_string()),
            },
            Rule {
                kind: RedactionRule::AddressScrub,
                applies: |f, _| f.value.is_string() && f.is(Category::Address),
                mask: |f| text(scrub_chain(&f.text)),
            },
        ];

        Self { rules }
    }

    fn rule_for(&self, field: &Field<'_>, signals: &SignalSet) -> Option<&Rule> {
        self.rules.iter().find(|rule| (rule.applies)(field, signals))
    }

    /// Build a redacted copy of the fields, in their original order.
    ///
    /// Fields no rule applies to are copied unchanged.
    pub fn redact(&self, fields: &[Field<'_>], signals: &SignalSet) -> (Record, Vec<RedactionInfo>) {
        let mut result = Record::new();
        let mut redactions = Vec::new();

        for field in fields {
            let value = match self.rule_for(field, signals) {
                Some(rule) => {
                    let masked = (rule.mask)(field);
                    if &masked != field.value {
                        redactions.push(RedactionInfo {
                            field: field.name.to_string(),
                            rule: rule.kind,
                        });
                    }
                    masked
                }
                None => field.value.clone(),
            };
            result.insert(field.name.to_string(), value);
        }

        (result, redactions)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}
