use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::encoder::{generate_vcard, normalize_url};
use crate::models::contact::{ContactInfo, non_blank};
use crate::models::validation::ValidationResult;
use crate::validation::typo::suggest_domain;

pub const MAX_URL_LENGTH: usize = 2000;
pub const MAX_TEXT_LENGTH: usize = 4000;
pub const DENSE_TEXT_LENGTH: usize = 2000;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_LENGTH: usize = 15;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]+$").unwrap());

pub fn validate_url(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if raw.trim().is_empty() {
        result.error("URL is required");
        return result;
    }

    let normalized = normalize_url(raw);
    match Url::parse(&normalized) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                result.warning(format!(
                    "URL uses the {} protocol and may not open in every scanner",
                    parsed.scheme()
                ));
            }
            if parsed.host_str().is_some_and(|host| host.contains("..")) {
                result.error("URL hostname contains consecutive dots");
            }
        }
        Err(_) => result.error("Invalid URL format"),
    }

    if normalized.chars().count() > MAX_URL_LENGTH {
        result.warning("URL is very long and will produce a dense QR code");
    }

    result.with_sanitized(normalized)
}

pub fn validate_text(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        result.error("Text is required");
        return result;
    }

    let length = trimmed.chars().count();
    if length > MAX_TEXT_LENGTH {
        result.error(format!(
            "Text is too long (maximum {} characters)",
            MAX_TEXT_LENGTH
        ));
    } else if length > DENSE_TEXT_LENGTH {
        result.warning("Long text will produce a dense QR code that may be hard to scan");
    }

    if trimmed.chars().any(|c| matches!(c as u32, 0x00..=0x1F | 0x7F)) {
        result.warning("Text contains control characters");
    }

    result.with_sanitized(trimmed)
}

pub fn validate_email(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        result.error("Email is required");
        return result;
    }

    if !EMAIL_SHAPE.is_match(trimmed) {
        result.error("Invalid email format");
    }
    if trimmed.chars().count() > MAX_EMAIL_LENGTH {
        result.error(format!(
            "Email is too long (maximum {} characters)",
            MAX_EMAIL_LENGTH
        ));
    }

    let sanitized = trimmed.to_lowercase();
    if result.valid {
        if let Some((local, domain)) = sanitized.rsplit_once('@') {
            if let Some(suggestion) = suggest_domain(domain) {
                result.warning(format!("Did you mean {}@{}?", local, suggestion));
            }
        }
    }

    result.with_sanitized(sanitized)
}

/// Phone is optional, so blank input is valid.
pub fn validate_phone(raw: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
        .collect();
    if stripped.is_empty() {
        return result.with_sanitized("");
    }

    if !PHONE_SHAPE.is_match(&stripped) {
        result.error("Phone number may only contain digits and a leading +");
        return result.with_sanitized(stripped);
    }

    let digits = stripped.trim_start_matches('+').len();
    if digits < MIN_PHONE_DIGITS {
        result.warning("Phone number seems too short");
    }
    if stripped.len() > MAX_PHONE_LENGTH {
        result.warning("Phone number seems too long");
    }

    result.with_sanitized(stripped)
}

/// Sub-field checks are unioned; `sanitized` is the encoded vCard.
pub fn validate_contact(contact: &ContactInfo) -> ValidationResult {
    let mut result = ValidationResult::new();
    if !contact.has_contact_fields() {
        result.error("At least one contact field is required");
        return result;
    }

    if let Some(email) = non_blank(&contact.email) {
        result.merge(validate_email(email));
    }
    if let Some(phone) = non_blank(&contact.phone) {
        result.merge(validate_phone(phone));
    }
    if let Some(url) = non_blank(&contact.url) {
        result.merge(validate_url(url));
    }

    result.with_sanitized(generate_vcard(contact))
}
