use serde::{Deserialize, Serialize};

use crate::models::content::{ContentType, ErrorCorrectionLevel};

pub const DEFAULT_SIZE: u32 = 400;

/// A single QR generation call. Built once by the caller and never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub content: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub error_correction_level: ErrorCorrectionLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BrandColors>,
    /// Logo as a base64 data URI ("data:image/png;base64,...").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Hex colours, "#rrggbb" or "#rgb".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl GenerationRequest {
    pub fn new(content: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            content: content.into(),
            content_type,
            size: DEFAULT_SIZE,
            error_correction_level: ErrorCorrectionLevel::default(),
            branding: None,
            margin: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_error_correction(mut self, level: ErrorCorrectionLevel) -> Self {
        self.error_correction_level = level;
        self
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = Some(branding);
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn colors(&self) -> Option<&BrandColors> {
        self.branding.as_ref().and_then(|b| b.colors.as_ref())
    }

    pub fn logo(&self) -> Option<&str> {
        self.branding.as_ref().and_then(|b| b.logo.as_deref())
    }

    pub fn metadata(&self) -> GenerationMetadata {
        GenerationMetadata {
            size: self.size,
            error_correction_level: self.error_correction_level,
            content_type: self.content_type,
            content_length: self.content.chars().count(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub size: u32,
    pub error_correction_level: ErrorCorrectionLevel,
    pub content_type: ContentType,
    pub content_length: usize,
}

/// Outcome of a generation call. Either `success` with a `data_url`, or a failure with `error`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_name: Option<String>,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,
}

impl GenerationResult {
    pub fn success(
        strategy_name: &str,
        data_url: String,
        data: Option<String>,
        request: &GenerationRequest,
    ) -> Self {
        Self {
            success: true,
            data,
            data_url: Some(data_url),
            error: None,
            strategy_name: Some(strategy_name.to_string()),
            timestamp: chrono::Utc::now().timestamp_millis(),
            metadata: Some(request.metadata()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            data_url: None,
            error: Some(error.into()),
            strategy_name: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
            metadata: None,
        }
    }

    /// Failure attributed to one strategy, used in logs.
    pub fn strategy_failure(strategy_name: &str, error: impl Into<String>) -> Self {
        Self {
            strategy_name: Some(strategy_name.to_string()),
            ..Self::failure(error)
        }
    }

    /// A success must actually carry an image.
    pub fn is_usable(&self) -> bool {
        self.success && self.data_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}
