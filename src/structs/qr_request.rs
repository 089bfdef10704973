use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::encoder::{WifiConfig, encode_sms, encode_wifi};
use crate::models::contact::ContactInfo;
use crate::models::content::{ContentType, ErrorCorrectionLevel};
use crate::models::generation::{Branding, DEFAULT_SIZE, GenerationRequest, GenerationResult};
use crate::models::qr_code::QrCodeRecord;
use crate::models::validation::ValidationResult;
use crate::validation::{validate_contact, validate_qr_content};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SmsMessage {
    pub number: String,
    pub message: Option<String>,
}

/// What the user typed: raw content, or a structured form for the types that have one.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_type: ContentType,
    pub contact: Option<ContactInfo>,
    pub wifi: Option<WifiConfig>,
    pub sms: Option<SmsMessage>,
}

impl ContentInput {
    /// Structured forms win over raw content.
    pub fn content_type(&self) -> ContentType {
        if self.contact.is_some() {
            ContentType::Contact
        } else if self.wifi.is_some() {
            ContentType::Wifi
        } else if self.sms.is_some() {
            ContentType::Sms
        } else {
            self.content_type
        }
    }

    /// Validate and produce the canonical content as `sanitized`.
    pub fn validate(&self) -> ValidationResult {
        if let Some(contact) = &self.contact {
            return validate_contact(contact);
        }
        if let Some(wifi) = &self.wifi {
            return validate_qr_content(&encode_wifi(wifi), ContentType::Wifi);
        }
        if let Some(sms) = &self.sms {
            let encoded = encode_sms(&sms.number, sms.message.as_deref());
            return validate_qr_content(&encoded, ContentType::Sms);
        }
        validate_qr_content(&self.content, self.content_type)
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrRequest {
    #[serde(flatten)]
    pub input: ContentInput,
    #[validate(range(min = 1, max = 4096, message = "Size must be between 1 and 4096 pixels"))]
    pub size: Option<u32>,
    pub error_correction_level: Option<ErrorCorrectionLevel>,
    pub branding: Option<Branding>,
    #[validate(range(max = 64, message = "Margin must be at most 64 modules"))]
    pub margin: Option<u32>,
    #[serde(default)]
    pub save: bool,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub favorite: Option<bool>,
}

impl CreateQrRequest {
    pub fn generation_request(&self, content: String) -> GenerationRequest {
        GenerationRequest {
            content,
            content_type: self.input.content_type(),
            size: self.size.unwrap_or(DEFAULT_SIZE),
            error_correction_level: self.error_correction_level.unwrap_or_default(),
            branding: self.branding.clone(),
            margin: self.margin,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrResponse {
    pub result: GenerationResult,
    pub validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<QrCodeRecord>,
}
