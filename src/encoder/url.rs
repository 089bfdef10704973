/// True when `value` starts with `http://` or `https://`, ignoring case.
pub fn has_http_scheme(value: &str) -> bool {
    let lower = value.get(..8).unwrap_or(value).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Trim and prefix `https://` unless an http(s) scheme is already present.
/// An existing `http://` is kept, never upgraded.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if has_http_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("https://{}", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_https_to_bare_host() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn keeps_http() {
        assert_eq!(normalize_url("http://x"), "http://x");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn scheme_check_ignores_case_and_trims() {
        assert_eq!(normalize_url("  HTTPS://Example.com/a "), "HTTPS://Example.com/a");
    }

    #[test]
    fn short_and_multibyte_input_does_not_panic() {
        assert!(!has_http_scheme("h"));
        assert!(!has_http_scheme("ééééé"));
        assert_eq!(normalize_url("ü.de"), "https://ü.de");
    }
}
