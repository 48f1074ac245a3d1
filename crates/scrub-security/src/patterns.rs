//! Value-shape matchers and the masks that go with them
//!
//! Every matcher searches anywhere in the text; none of them look at field names.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Replacement for values that are removed outright
pub const REDACTED_MARKER: &str = "[REDACTED_PII]";

const FILLER: char = 'X';
const HANDLE_FILLER: &str = "****";

/// Known payment-provider suffixes (the part after `@`)
pub const PAYMENT_PROVIDERS: &[&str] = &[
    "upi",
    "ybl",
    "ibl",
    "oksbi",
    "okhdfcbank",
    "okicici",
    "okaxis",
    "okyesbank",
    "apl",
    "axl",
    "sbi",
    "paytm",
    "ptsbi",
    "jupiter",
    "airtel",
    "yapl",
    "hsbc",
    "freecharge",
    "mobikwik",
    "gpay",
];

// Maximal digit runs; a phone number is a run of exactly ten.
static DIGIT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex: digit run"));

// 1234 5678 9012 or 123456789012
static NATIONAL_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9]{4}\s?[0-9]{4}\s?[0-9]{4}\b").expect("static regex: national id")
});

// Q, X and Z are never issued as the leading letter
static PASSPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-PR-WY][0-9]{7}\b").expect("static regex: passport"));

static PAYMENT_HANDLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z0-9._-]{2,})@([A-Za-z][A-Za-z0-9._-]{1,})\b")
        .expect("static regex: payment handle")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z0-9._%+-]+)@([A-Za-z0-9.-]+\.[A-Za-z]{2,})\b")
        .expect("static regex: email")
});

static IP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|1?[0-9]{1,2})\.){3}(?:25[0-5]|2[0-4][0-9]|1?[0-9]{1,2})\b",
    )
    .expect("static regex: ip address")
});

static PIN_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{6}\b").expect("static regex: pin token"));

fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_known_provider(provider: &str) -> bool {
    PAYMENT_PROVIDERS.contains(&provider.to_ascii_lowercase().as_str())
}

pub fn is_phone(text: &str) -> bool {
    DIGIT_RUN_REGEX.find_iter(text).any(|m| m.len() == 10)
}

pub fn is_national_id(text: &str) -> bool {
    NATIONAL_ID_REGEX.is_match(text) || digits_only(text).len() == 12
}

pub fn is_passport(text: &str) -> bool {
    PASSPORT_REGEX.is_match(text)
}

/// `handle@provider` where the provider is on the allow-list
pub fn is_payment_handle(text: &str) -> bool {
    PAYMENT_HANDLE_REGEX
        .captures_iter(text)
        .any(|cap| is_known_provider(&cap[2]))
}

pub fn is_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text)
}

pub fn is_ip(text: &str) -> bool {
    IP_REGEX.is_match(text)
}

/// A digit, a letter and a standalone six-digit postal code
pub fn is_address(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(|c| c.is_ascii_alphabetic())
        && PIN_TOKEN_REGEX.is_match(text)
}

/// The whole value is a six-digit postal code
pub fn is_postal_code(text: &str) -> bool {
    text.len() == 6 && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_name_token(token: &str) -> bool {
    token.len() >= 2
        && token.chars().any(|c| c.is_ascii_alphabetic())
        && token
            .chars()
            .all(|c| c.is_ascii_alphabetic() || matches!(c, '.' | '-' | '\''))
}

/// At least two word-shaped tokens; other tokens are ignored
pub fn is_name(text: &str) -> bool {
    text.split_whitespace().filter(|t| is_name_token(t)).count() >= 2
}

/// `9876543210` -> `98XXXXXX10`, for every isolated ten-digit run
pub fn mask_phone(text: &str) -> String {
    DIGIT_RUN_REGEX
        .replace_all(text, |cap: &Captures| {
            let run = &cap[0];
            if run.len() == 10 {
                format!("{}XXXXXX{}", &run[..2], &run[8..])
            } else {
                run.to_string()
            }
        })
        .into_owned()
}

/// Twelve digits -> `XXXX XXXX 9012`; anything else is returned unchanged
pub fn mask_national_id(text: &str) -> String {
    let digits = digits_only(text);
    if digits.len() == 12 {
        format!("XXXX XXXX {}", &digits[8..])
    } else {
        text.to_string()
    }
}

/// Replace each passport number in the text with the marker
pub fn mask_passport(text: &str) -> String {
    PASSPORT_REGEX
        .replace_all(text, REDACTED_MARKER)
        .into_owned()
}

/// `ab12@upi` -> `ab****@upi`; unknown providers are left alone
pub fn mask_payment_handle(text: &str) -> String {
    PAYMENT_HANDLE_REGEX
        .replace_all(text, |cap: &Captures| {
            let (handle, provider) = (&cap[1], &cap[2]);
            if is_known_provider(provider) {
                format!("{}{HANDLE_FILLER}@{provider}", &handle[..2])
            } else {
                cap[0].to_string()
            }
        })
        .into_owned()
}

/// `john.smith@example.com` -> `jo****@example.com`
pub fn mask_email(text: &str) -> String {
    EMAIL_REGEX
        .replace_all(text, |cap: &Captures| {
            let local = &cap[1];
            let keep = local.len().min(2);
            format!("{}{HANDLE_FILLER}@{}", &local[..keep], &cap[2])
        })
        .into_owned()
}

/// `John Smith` -> `JXXX SXXXX`
pub fn mask_name(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let len = word.chars().count();
            match word.chars().next() {
                Some(first) if len > 1 => std::iter::once(first)
                    .chain(std::iter::repeat_n(FILLER, len - 1))
                    .collect::<String>(),
                _ => FILLER.to_string(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Every ASCII digit becomes the filler character
pub fn mask_digits(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_digit() { FILLER } else { c })
        .collect()
}
