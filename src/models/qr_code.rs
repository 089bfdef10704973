use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use crate::models::content::{ContentType, ErrorCorrectionLevel};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRecord {
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    pub data_url: String,
    pub created_at: i64, // timestamp in milliseconds
    pub updated_at: i64, // refreshed on every update
    pub metadata: RecordMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub size: u32,
    pub error_correction_level: ErrorCorrectionLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

/// Fields replaced by an update. `metadata`, when present, replaces the whole metadata object.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

impl QrCodeRecord {
    pub fn new(
        content: String,
        content_type: ContentType,
        data_url: String,
        metadata: RecordMetadata,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Self {
            id: nanoid!(),
            content,
            content_type,
            data_url,
            created_at: now,
            updated_at: now,
            metadata,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.metadata.favorite.unwrap_or(false)
    }

    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        self.metadata
            .tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|tag| wanted.contains(tag)))
    }

    /// Shallow merge of `patch`. The id never changes and `updated_at` is always refreshed.
    pub fn apply(&mut self, patch: RecordPatch, now: i64) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(data_url) = patch.data_url {
            self.data_url = data_url;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
        self.updated_at = now;
    }
}

impl RecordMetadata {
    pub fn new(size: u32, error_correction_level: ErrorCorrectionLevel) -> Self {
        Self {
            size,
            error_correction_level,
            name: None,
            tags: None,
            favorite: None,
        }
    }
}
