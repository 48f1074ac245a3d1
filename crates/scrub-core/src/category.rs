use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category a record field can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Phone,
    NationalId,
    Passport,
    PaymentHandle,
    GivenName,
    FamilyName,
    FullName,
    Email,
    Address,
    City,
    State,
    PostalCode,
    DeviceId,
    IpAddress,
}

// Field-name aliases, lower-case, matched exactly.
const PHONE_KEYS: &[&str] = &["phone", "mobile", "contact", "alt_phone"];
const NATIONAL_ID_KEYS: &[&str] = &[
    "aadhar",
    "aadhaar",
    "aadhar_number",
    "aadhaar_number",
    "address_proof",
];
const PASSPORT_KEYS: &[&str] = &["passport", "passport_no", "passport_number"];
const PAYMENT_HANDLE_KEYS: &[&str] = &["upi", "upi_id", "vpa"];
const GIVEN_NAME_KEYS: &[&str] = &["first_name"];
const FAMILY_NAME_KEYS: &[&str] = &["last_name"];
const FULL_NAME_KEYS: &[&str] = &["name"];
const EMAIL_KEYS: &[&str] = &["email", "username"];
const ADDRESS_KEYS: &[&str] = &["address", "address_line", "street"];
const CITY_KEYS: &[&str] = &["city"];
const STATE_KEYS: &[&str] = &["state"];
const POSTAL_CODE_KEYS: &[&str] = &["pin_code", "pincode", "zip", "zipcode", "postal_code"];
const DEVICE_ID_KEYS: &[&str] = &["device_id", "device", "android_id", "ios_id"];
const IP_ADDRESS_KEYS: &[&str] = &["ip", "ip_address"];

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Phone,
        Category::NationalId,
        Category::Passport,
        Category::PaymentHandle,
        Category::GivenName,
        Category::FamilyName,
        Category::FullName,
        Category::Email,
        Category::Address,
        Category::City,
        Category::State,
        Category::PostalCode,
        Category::DeviceId,
        Category::IpAddress,
    ];

    /// Field names that select this category
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::Phone => PHONE_KEYS,
            Category::NationalId => NATIONAL_ID_KEYS,
            Category::Passport => PASSPORT_KEYS,
            Category::PaymentHandle => PAYMENT_HANDLE_KEYS,
            Category::GivenName => GIVEN_NAME_KEYS,
            Category::FamilyName => FAMILY_NAME_KEYS,
            Category::FullName => FULL_NAME_KEYS,
            Category::Email => EMAIL_KEYS,
            Category::Address => ADDRESS_KEYS,
            Category::City => CITY_KEYS,
            Category::State => STATE_KEYS,
            Category::PostalCode => POSTAL_CODE_KEYS,
            Category::DeviceId => DEVICE_ID_KEYS,
            Category::IpAddress => IP_ADDRESS_KEYS,
        }
    }

    /// Check a field name against this category's aliases.
    ///
    /// `key` must already be lower-cased.
    pub fn matches_key(self, key: &str) -> bool {
        self.aliases().contains(&key)
    }

    /// Categories whose valid presence alone makes a record PII
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            Category::Phone | Category::NationalId | Category::Passport | Category::PaymentHandle
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Phone => "phone",
            Category::NationalId => "national_id",
            Category::Passport => "passport",
            Category::PaymentHandle => "payment_handle",
            Category::GivenName => "given_name",
            Category::FamilyName => "family_name",
            Category::FullName => "full_name",
            Category::Email => "email",
            Category::Address => "address",
            Category::City => "city",
            Category::State => "state",
            Category::PostalCode => "postal_code",
            Category::DeviceId => "device_id",
            Category::IpAddress => "ip_address",
        }
    }

    /// Every category whose alias set contains `key`
    pub fn for_key(key: &str) -> impl Iterator<Item = Category> + '_ {
        Self::ALL.into_iter().filter(move |c| c.matches_key(key))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
