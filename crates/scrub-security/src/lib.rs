//! PII classification and redaction for flat records
//!
//! Pipeline for one record: [`classifier`] picks candidate categories by
//! field name and confirms them with [`patterns`], [`scorer`] turns the
//! signals into a verdict, and [`redactor`] masks the flagged fields.

pub mod classifier;
pub mod patterns;
pub mod redactor;
pub mod scorer;

use scrub_core::{Record, Verdict};

pub use classifier::{Classification, Field, classify};
pub use redactor::Redactor;

/// Classifies and redacts records; holds no per-record state
#[derive(Default)]
pub struct Scanner {
    redactor: Redactor,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one record. Never fails: unmatched fields are simply left alone.
    pub fn scan(&self, record: &Record) -> Verdict {
        let fields = classifier::fields(record);
        let classification = classifier::classify_fields(&fields);
        let score = scorer::score(&classification.signals);
        let is_pii = scorer::is_pii(&classification);

        let (redacted, redactions) = if is_pii {
            self.redactor.redact(&fields, &classification.signals)
        } else {
            (record.clone(), Vec::new())
        };

        Verdict {
            is_pii,
            direct: classification.direct,
            score,
            signals: classification.signals,
            redacted,
            redactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_no_sensitive_keys() {
        let input = record(json!({"order_id": 42, "product": "Desk", "phone_model": "9876543210"}));
        let verdict = Scanner::new().scan(&input);

        assert!(!verdict.is_pii);
        assert_eq!(verdict.redacted, input);
        assert!(verdict.redactions.is_empty());
    }

    #[test]
    fn test_name_and_email() {
        let input = record(json!({"name": "John Smith", "email": "john.smith@example.com"}));
        let verdict = Scanner::new().scan(&input);

        assert!(verdict.is_pii);
        assert!(!verdict.direct);
        assert_eq!(verdict.score, 2);
        assert_eq!(verdict.redacted["name"], "JXXX SXXXX");
        assert_eq!(verdict.redacted["email"], "jo****@example.com");
    }

    #[test]
    fn test_email_alone_passes_through() {
        let input = record(json!({"email": "john.smith@example.com", "city": "Pune"}));
        let verdict = Scanner::new().scan(&input);

        assert!(!verdict.is_pii);
        assert_eq!(verdict.redacted, input);
    }

    #[test]
    fn test_city_and_state_alone_are_not_pii() {
        let input = record(json!({"city": "Metropolis", "state": "Freedonia"}));
        let verdict = Scanner::new().scan(&input);

        assert!(verdict.signals.address());
        assert_eq!(verdict.score, 1);
        assert!(!verdict.is_pii);
    }

    #[test]
    fn test_inferred_address_plus_device() {
        let input = record(json!({
            "city": "Metropolis",
            "state": "Freedonia",
            "device_id": "D-991",
            "address": "Block 7, near park",
        }));
        let verdict = Scanner::new().scan(&input);

        assert!(verdict.is_pii);
        assert_eq!(verdict.redacted["address"], "Block X, near park");
        assert_eq!(verdict.redacted["city"], "Metropolis");
        assert_eq!(verdict.redacted["device_id"], patterns::REDACTED_MARKER);
    }

    #[test]
    fn test_direct_identifier_redacts_everything_sensitive() {
        let input = record(json!({
            "phone": "9876543210",
            "email": "john.smith@example.com",
            "name": "John Smith",
        }));
        let verdict = Scanner::new().scan(&input);

        assert!(verdict.direct);
        assert_eq!(verdict.redacted["phone"], "98XXXXXX10");
        assert_eq!(verdict.redacted["name"], "JXXX SXXXX");
        assert_eq!(verdict.redacted["email"], "jo****@example.com");
    }

    #[test]
    fn test_input_not_mutated() {
        let input = record(json!({"phone": "9876543210"}));
        let before = input.clone();
        let _ = Scanner::new().scan(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let scanner = Scanner::new();
        let inputs = [
            json!({"phone": "9876543210", "aadhar": "1234 5678 9012", "upi": "ab12@upi"}),
            json!({"passport": "P1234567", "address": "Flat 4, call 9876543210"}),
            json!({"name": "John Smith", "email": "john.smith@example.com", "ip": "10.0.0.1"}),
            json!({"first_name": "John", "last_name": "Smith", "device": "pixel-7",
                   "address": "12 MG Road 560001", "city": "Pune", "pin_code": "411001"}),
        ];

        for input in inputs {
            let once = scanner.scan(&record(input)).redacted;
            let twice = scanner.scan(&once).redacted;
            assert_eq!(once, twice);
        }
    }
}
