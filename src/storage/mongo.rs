use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, to_bson};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::models::qr_code::{QrCodeRecord, RecordPatch};
use crate::storage::{ListOptions, StorageError, StorageProvider, query};

pub const COLLECTION: &str = "qr_codes";

/// Structured store: one document per record, keyed by the record `id`.
/// Lookup and write failures are returned, never swallowed.
pub struct MongoStorage {
    collection: Collection<QrCodeRecord>,
}

impl MongoStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<QrCodeRecord>(COLLECTION),
        }
    }

    /// Unique `id` plus the secondary indexes used by `list` filters.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            IndexModel::builder().keys(doc! { "contentType": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "metadata.favorite": 1 })
                .build(),
        ];
        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

/// Server-side form of the `list` filters.
pub fn filter_document(options: &ListOptions) -> Document {
    let mut filter = doc! {};
    if let Some(content_type) = options.content_type {
        filter.insert("contentType", content_type.as_str());
    }
    if let Some(tags) = options.tags.as_ref().filter(|tags| !tags.is_empty()) {
        filter.insert("metadata.tags", doc! { "$in": tags.clone() });
    }
    match options.favorite {
        Some(true) => {
            filter.insert("metadata.favorite", true);
        }
        // records without the flag count as not favourite
        Some(false) => {
            filter.insert("metadata.favorite", doc! { "$ne": true });
        }
        None => {}
    }
    filter
}

/// Natural order is unspecified; `_id` grows with each insert and survives
/// `replace_one`, so it serves as the tie-break for equal sort keys.
pub fn insertion_order() -> Document {
    doc! { "_id": 1 }
}

/// `$set` update for a patch. `updatedAt` is always written and `id` never is.
pub fn update_document(patch: &RecordPatch, now: i64) -> Result<Document, StorageError> {
    let mut set = doc! { "updatedAt": now };
    if let Some(content) = &patch.content {
        set.insert("content", content.as_str());
    }
    if let Some(content_type) = patch.content_type {
        set.insert("contentType", content_type.as_str());
    }
    if let Some(data_url) = &patch.data_url {
        set.insert("dataUrl", data_url.as_str());
    }
    if let Some(metadata) = &patch.metadata {
        set.insert("metadata", to_bson(metadata)?);
    }
    Ok(doc! { "$set": Bson::Document(set) })
}

#[async_trait]
impl StorageProvider for MongoStorage {
    async fn save(&self, record: &QrCodeRecord) -> Result<(), StorageError> {
        self.collection
            .replace_one(doc! { "id": &record.id }, record)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<QrCodeRecord>, StorageError> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn list(&self, options: &ListOptions) -> Result<Vec<QrCodeRecord>, StorageError> {
        let records: Vec<QrCodeRecord> = self
            .collection
            .find(filter_document(options))
            .sort(insertion_order())
            .await?
            .try_collect()
            .await?;
        Ok(query::sort_and_paginate(records, options))
    }

    async fn update(&self, id: &str, patch: RecordPatch) -> Result<QrCodeRecord, StorageError> {
        let update = update_document(&patch, chrono::Utc::now().timestamp_millis())?;
        self.collection
            .find_one_and_update(doc! { "id": id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.collection.delete_many(doc! {}).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{ContentType, ErrorCorrectionLevel};
    use crate::models::qr_code::RecordMetadata;

    #[test]
    fn empty_options_match_everything() {
        assert_eq!(filter_document(&ListOptions::default()), doc! {});
    }

    #[test]
    fn filters_translate_to_query_operators() {
        let options = ListOptions {
            content_type: Some(ContentType::Url),
            tags: Some(vec!["work".into(), "print".into()]),
            favorite: Some(true),
            ..Default::default()
        };
        assert_eq!(
            filter_document(&options),
            doc! {
                "contentType": "url",
                "metadata.tags": { "$in": ["work", "print"] },
                "metadata.favorite": true,
            }
        );
    }

    #[test]
    fn not_favourite_includes_unflagged_records() {
        let options = ListOptions {
            favorite: Some(false),
            tags: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            filter_document(&options),
            doc! { "metadata.favorite": { "$ne": true } }
        );
    }

    #[test]
    fn fetch_order_follows_insertion() {
        assert_eq!(insertion_order(), doc! { "_id": 1 });
    }

    #[test]
    fn update_document_sets_only_patched_fields() {
        let patch = RecordPatch {
            content: Some("new".into()),
            content_type: Some(ContentType::Text),
            ..Default::default()
        };
        assert_eq!(
            update_document(&patch, 42).unwrap(),
            doc! { "$set": { "updatedAt": 42_i64, "content": "new", "contentType": "text" } }
        );
    }

    #[test]
    fn update_document_replaces_metadata_object() {
        let mut metadata = RecordMetadata::new(300, ErrorCorrectionLevel::Q);
        metadata.tags = Some(vec!["a".into()]);
        let patch = RecordPatch {
            metadata: Some(metadata),
            ..Default::default()
        };
        let update = update_document(&patch, 1).unwrap();
        let set = update.get_document("$set").unwrap();
        let metadata = set.get_document("metadata").unwrap();
        assert_eq!(metadata.get_str("errorCorrectionLevel").unwrap(), "Q");
        assert!(metadata.get("favorite").is_none());
        assert!(set.get("id").is_none());
    }
}
