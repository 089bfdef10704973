use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of payload a QR code carries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    #[default]
    Text,
    Contact,
    Email,
    Phone,
    Wifi,
    Sms,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Contact => "contact",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Wifi => "wifi",
            ContentType::Sms => "sms",
        }
    }

    /// Lenient parse used for query strings. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "url" => Some(ContentType::Url),
            "text" => Some(ContentType::Text),
            "contact" => Some(ContentType::Contact),
            "email" => Some(ContentType::Email),
            "phone" => Some(ContentType::Phone),
            "wifi" => Some(ContentType::Wifi),
            "sms" => Some(ContentType::Sms),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// QR error correction level, lowest to highest redundancy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrectionLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => "L",
            ErrorCorrectionLevel::M => "M",
            ErrorCorrectionLevel::Q => "Q",
            ErrorCorrectionLevel::H => "H",
        }
    }
}

impl From<ErrorCorrectionLevel> for qrcode::EcLevel {
    fn from(level: ErrorCorrectionLevel) -> Self {
        match level {
            ErrorCorrectionLevel::L => qrcode::EcLevel::L,
            ErrorCorrectionLevel::M => qrcode::EcLevel::M,
            ErrorCorrectionLevel::Q => qrcode::EcLevel::Q,
            ErrorCorrectionLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_serializes_lowercase() {
        let json = serde_json::to_string(&ContentType::Contact).unwrap();
        assert_eq!(json, "\"contact\"");
        let parsed: ContentType = serde_json::from_str("\"wifi\"").unwrap();
        assert_eq!(parsed, ContentType::Wifi);
    }

    #[test]
    fn content_type_parse_is_case_insensitive() {
        assert_eq!(ContentType::parse(" URL "), Some(ContentType::Url));
        assert_eq!(ContentType::parse("fax"), None);
    }

    #[test]
    fn defaults_match_request_defaults() {
        assert_eq!(ErrorCorrectionLevel::default(), ErrorCorrectionLevel::M);
        assert_eq!(ContentType::default(), ContentType::Text);
    }
}
