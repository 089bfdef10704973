//! Persistence for generated codes behind one contract, with a structured
//! (MongoDB) backend and a flat key-value fallback.

pub mod error;
pub mod factory;
pub mod flat;
pub mod mongo;
pub mod query;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::content::ContentType;
use crate::models::qr_code::{QrCodeRecord, RecordPatch};

pub use error::StorageError;
pub use factory::StorageFactory;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters are conjunctive; `tags` matches records carrying any of the given tags.
/// Pagination applies after filtering and sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub content_type: Option<ContentType>,
    pub tags: Option<Vec<String>>,
    pub favorite: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub count: usize,
    /// Length of the serialized snapshot.
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_record: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_record: Option<i64>,
}

/// Each call is atomic on its own; sequences of calls are not.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Insert, or fully replace the record with the same id.
    async fn save(&self, record: &QrCodeRecord) -> Result<(), StorageError>;

    async fn get(&self, id: &str) -> Result<Option<QrCodeRecord>, StorageError>;

    async fn list(&self, options: &ListOptions) -> Result<Vec<QrCodeRecord>, StorageError>;

    /// Merge `patch` into an existing record. Fails with `NotFound` for unknown ids.
    async fn update(&self, id: &str, patch: RecordPatch) -> Result<QrCodeRecord, StorageError>;

    /// Missing ids are not an error.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    async fn clear(&self) -> Result<(), StorageError>;

    async fn export(&self) -> Result<Vec<QrCodeRecord>, StorageError> {
        self.list(&ListOptions::default()).await
    }

    /// Upsert every record; records absent from `records` are untouched.
    async fn import(&self, records: &[QrCodeRecord]) -> Result<usize, StorageError> {
        for record in records {
            self.save(record).await?;
        }
        Ok(records.len())
    }

    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(query::stats(&self.export().await?)?)
    }
}
