use crate::encoder::url::normalize_url;
use crate::models::contact::{ContactInfo, non_blank};

/// Escape a text value for vCard 3.0 (RFC 2426 section 4).
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Assemble a vCard 3.0 for `contact`. Blank forms produce an empty string.
pub fn generate_vcard(contact: &ContactInfo) -> String {
    if !contact.has_contact_fields() {
        return String::new();
    }

    let first = contact.first_name().unwrap_or_default();
    let last = non_blank(&contact.last_name).unwrap_or_default();

    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

    if !first.is_empty() || !last.is_empty() {
        let full_name = format!("{} {}", first, last);
        lines.push(format!("FN:{}", escape(full_name.trim())));
        lines.push(format!("N:{};{};;;", escape(last), escape(first)));
    }
    if let Some(org) = non_blank(&contact.organization) {
        lines.push(format!("ORG:{}", escape(org)));
    }
    if let Some(phone) = non_blank(&contact.phone) {
        lines.push(format!("TEL:{}", escape(phone)));
    }
    if let Some(email) = non_blank(&contact.email) {
        lines.push(format!("EMAIL:{}", escape(email)));
    }
    if let Some(url) = non_blank(&contact.url) {
        lines.push(format!("URL:{}", normalize_url(url)));
    }
    if let Some(address) = contact.address.as_ref().filter(|a| !a.is_empty()) {
        let part = |field: &Option<String>| escape(non_blank(field).unwrap_or_default());
        lines.push(format!(
            "ADR:;;{};{};{};{};{}",
            part(&address.street),
            part(&address.city),
            part(&address.state),
            part(&address.postal_code),
            part(&address.country),
        ));
    }
    if let Some(birthday) = non_blank(&contact.birthday) {
        lines.push(format!("BDAY:{}", escape(birthday)));
    }
    if let Some(notes) = non_blank(&contact.notes) {
        lines.push(format!("NOTE:{}", escape(notes)));
    }
    lines.push("END:VCARD".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::Address;

    #[test]
    fn blank_contact_yields_empty_string() {
        assert_eq!(generate_vcard(&ContactInfo::default()), "");
    }

    #[test]
    fn first_name_only_is_five_lines() {
        let contact = ContactInfo {
            first_name: "Ada".into(),
            ..Default::default()
        };
        let card = generate_vcard(&contact);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(
            lines,
            vec!["BEGIN:VCARD", "VERSION:3.0", "FN:Ada", "N:;Ada;;;", "END:VCARD"]
        );
    }

    #[test]
    fn full_contact_in_fixed_order() {
        let contact = ContactInfo {
            first_name: "Ada".into(),
            last_name: Some("Lovelace".into()),
            phone: Some("+44 20 1234".into()),
            email: Some("ada@example.com".into()),
            organization: Some("Analytical Engines".into()),
            url: Some("ada.dev".into()),
            address: Some(Address {
                city: Some("London".into()),
                country: Some("UK".into()),
                ..Default::default()
            }),
            birthday: Some("1815-12-10".into()),
            notes: Some("First programmer".into()),
        };
        let card = generate_vcard(&contact);
        let expected = [
            "BEGIN:VCARD",
            "VERSION:3.0",
            "FN:Ada Lovelace",
            "N:Lovelace;Ada;;;",
            "ORG:Analytical Engines",
            "TEL:+44 20 1234",
            "EMAIL:ada@example.com",
            "URL:https://ada.dev",
            "ADR:;;;London;;;UK",
            "BDAY:1815-12-10",
            "NOTE:First programmer",
            "END:VCARD",
        ]
        .join("\n");
        assert_eq!(card, expected);
    }

    #[test]
    fn organization_only_has_no_name_lines() {
        let contact = ContactInfo {
            organization: Some("Acme".into()),
            ..Default::default()
        };
        let card = generate_vcard(&contact);
        assert!(!card.lines().any(|l| l.starts_with("FN:") || l.starts_with("N:")));
        assert!(card.contains("ORG:Acme"));
    }

    #[test]
    fn empty_address_is_omitted() {
        let contact = ContactInfo {
            first_name: "Ada".into(),
            address: Some(Address {
                street: Some("  ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!generate_vcard(&contact).contains("ADR:"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let contact = ContactInfo {
            first_name: "Ada".into(),
            organization: Some("Smith, Jones; Partners".into()),
            notes: Some("line one\nline two \\ end".into()),
            ..Default::default()
        };
        let card = generate_vcard(&contact);
        assert!(card.contains("ORG:Smith\\, Jones\\; Partners"));
        assert!(card.contains("NOTE:line one\\nline two \\\\ end"));
        assert_eq!(card.lines().count(), 7);
    }
}
