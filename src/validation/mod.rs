//! Pure input checks. Validators never fail; problems come back as data in a
//! [`ValidationResult`], hard errors separated from advisory warnings.

pub mod typo;
pub mod validators;

pub use validators::{
    validate_contact, validate_email, validate_phone, validate_text, validate_url,
};

use crate::models::content::ContentType;
use crate::models::validation::ValidationResult;

/// Route raw string content to the validator for its type. Types without a
/// dedicated validator (wifi, sms, pre-encoded contact cards) are checked as text.
pub fn validate_qr_content(content: &str, content_type: ContentType) -> ValidationResult {
    match content_type {
        ContentType::Url => validate_url(content),
        ContentType::Email => validate_email(content),
        ContentType::Phone => validate_phone(content),
        ContentType::Text | ContentType::Contact | ContentType::Wifi | ContentType::Sms => {
            validate_text(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_type() {
        let url = validate_qr_content("example.com", ContentType::Url);
        assert_eq!(url.sanitized.as_deref(), Some("https://example.com"));

        let email = validate_qr_content("A@B.CO", ContentType::Email);
        assert_eq!(email.sanitized.as_deref(), Some("a@b.co"));

        let phone = validate_qr_content("555.123.4567", ContentType::Phone);
        assert_eq!(phone.sanitized.as_deref(), Some("5551234567"));
    }

    #[test]
    fn other_types_fall_back_to_text() {
        let wifi = validate_qr_content("  WIFI:T:WPA;S:x;P:y;;  ", ContentType::Wifi);
        assert!(wifi.valid);
        assert_eq!(wifi.sanitized.as_deref(), Some("WIFI:T:WPA;S:x;P:y;;"));

        assert!(!validate_qr_content("", ContentType::Sms).valid);
    }
}
