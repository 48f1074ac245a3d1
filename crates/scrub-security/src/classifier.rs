//! Field classification: key taxonomy first, value shape second

use scrub_core::{Category, Record, SignalSet, value_text};
use serde::Serialize;
use serde_json::Value;

use crate::patterns;

/// One record field with its key and value normalized for matching
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Key as it appears in the record
    pub name: &'a str,
    /// Lower-cased key used for taxonomy lookups
    pub key: String,
    pub value: &'a Value,
    pub text: String,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a Value) -> Self {
        Self {
            name,
            key: name.to_lowercase(),
            value,
            text: value_text(value),
        }
    }

    pub fn is(&self, category: Category) -> bool {
        category.matches_key(&self.key)
    }

    pub fn is_any(&self, categories: &[Category]) -> bool {
        categories.iter().any(|c| self.is(*c))
    }

    /// Field is named for `category` and its value has that category's shape
    pub fn is_valid(&self, category: Category) -> bool {
        self.is(category) && validates(category, &self.text)
    }
}

/// Fields of a record in order
pub fn fields(record: &Record) -> Vec<Field<'_>> {
    record.iter().map(|(k, v)| Field::new(k, v)).collect()
}

/// Value-shape check for a category; presence-only categories accept any non-empty text
pub fn validates(category: Category, text: &str) -> bool {
    match category {
        Category::Phone => patterns::is_phone(text),
        Category::NationalId => patterns::is_national_id(text),
        Category::Passport => patterns::is_passport(text),
        Category::PaymentHandle => patterns::is_payment_handle(text),
        Category::FullName => patterns::is_name(text),
        Category::Email => patterns::is_email(text),
        Category::Address => patterns::is_address(text),
        Category::PostalCode => patterns::is_postal_code(text),
        Category::IpAddress => patterns::is_ip(text),
        Category::GivenName
        | Category::FamilyName
        | Category::City
        | Category::State
        | Category::DeviceId => !text.is_empty(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// A direct identifier was found somewhere in the record
    pub direct: bool,
    pub signals: SignalSet,
}

/// Direct identifier carried by a field, if any.
///
/// Address fields count when they embed a phone, national ID or payment handle.
fn direct_hit(field: &Field<'_>) -> Option<Category> {
    let named = Category::ALL
        .into_iter()
        .filter(|c| c.is_direct())
        .find(|c| field.is_valid(*c));
    if named.is_some() {
        return named;
    }

    if field.is(Category::Address) {
        return [Category::Phone, Category::NationalId, Category::PaymentHandle]
            .into_iter()
            .find(|c| validates(*c, &field.text));
    }

    None
}

pub fn classify(record: &Record) -> Classification {
    classify_fields(&fields(record))
}

pub fn classify_fields(fields: &[Field<'_>]) -> Classification {
    let mut result = Classification::default();

    for field in fields {
        if let Some(category) = direct_hit(field) {
            tracing::trace!(field = field.name, %category, "direct identifier");
            result.direct = true;
        }

        for category in Category::for_key(&field.key) {
            if validates(category, &field.text) {
                tracing::trace!(field = field.name, %category, "signal");
                result.signals.insert(category);
            }
        }
    }

    // City with a state or postal code pins down an address on its own
    let signals = &mut result.signals;
    if signals.contains(Category::City)
        && (signals.contains(Category::PostalCode) || signals.contains(Category::State))
    {
        signals.insert(Category::Address);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_direct_phone() {
        let c = classify(&record(json!({"phone": "9876543210"})));
        assert!(c.direct);
        assert!(c.signals.contains(Category::Phone));
    }

    #[test]
    fn test_name_only_match_is_not_direct() {
        let c = classify(&record(json!({"phone": "98765", "passport": "hello"})));
        assert!(!c.direct);
        assert!(c.signals.is_empty());
    }

    #[test]
    fn test_shape_without_key_is_ignored() {
        let c = classify(&record(json!({"notes": "9876543210 john@example.com"})));
        assert!(!c.direct);
        assert!(c.signals.is_empty());
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let c = classify(&record(json!({"Phone": "9876543210", "EMAIL": "a@b.co"})));
        assert!(c.direct);
        assert!(c.signals.email());
    }

    #[test]
    fn test_numeric_value_is_coerced() {
        let c = classify(&record(json!({"mobile": 9876543210u64})));
        assert!(c.direct);
    }

    #[test]
    fn test_address_with_embedded_identifier() {
        let c = classify(&record(json!({"address": "Flat 4, pay ravi99@ybl"})));
        assert!(c.direct);
        assert!(!c.signals.address());
    }

    #[test]
    fn test_unknown_provider_is_not_direct() {
        let c = classify(&record(json!({"upi_id": "ab12@unknownbank"})));
        assert!(!c.direct);
    }

    #[test]
    fn test_presence_categories() {
        let c = classify(&record(json!({
            "first_name": "A",
            "last_name": "",
            "device_id": null,
            "city": "Pune",
        })));
        assert!(c.signals.contains(Category::GivenName));
        assert!(!c.signals.contains(Category::FamilyName));
        assert!(!c.signals.contains(Category::DeviceId));
        assert!(c.signals.contains(Category::City));
    }

    #[test]
    fn test_postal_code_must_be_six_digits() {
        let c = classify(&record(json!({"pin_code": 560001, "zip": "5600"})));
        assert!(c.signals.contains(Category::PostalCode));

        let c = classify(&record(json!({"zip": "5600"})));
        assert!(!c.signals.contains(Category::PostalCode));
    }

    #[test]
    fn test_geographic_inference() {
        let c = classify(&record(json!({"city": "Metropolis", "state": "Freedonia"})));
        assert!(c.signals.address());

        let c = classify(&record(json!({"city": "Metropolis", "zipcode": "400001"})));
        assert!(c.signals.address());

        let c = classify(&record(json!({"state": "Freedonia", "zipcode": "400001"})));
        assert!(!c.signals.address());
    }

    #[test]
    fn test_ip_requires_valid_octets() {
        let c = classify(&record(json!({"ip_address": "300.1.1.1"})));
        assert!(!c.signals.device_or_network());

        let c = classify(&record(json!({"ip": "10.0.0.7"})));
        assert!(c.signals.device_or_network());
    }
}
