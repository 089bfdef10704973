use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::models::qr_code::{QrCodeRecord, RecordPatch};
use crate::storage::{ListOptions, StorageError, StorageProvider, query};

/// Key under which the whole collection is stored as one JSON array.
pub const RECORDS_KEY: &str = "qr-code-records";

/// Minimal string key-value backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> std::io::Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> std::io::Result<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    /// Bytes that are not UTF-8 are treated like a missing key.
    async fn get(&self, key: &str) -> std::io::Result<Option<String>> {
        let bytes = match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        match String::from_utf8(bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable blob '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        // write then rename so readers never see a half-written file
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, self.path(key)).await
    }
}

/// Process-local store, gone on restart.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> std::io::Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> std::io::Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Stores every record in one serialized blob. A corrupt blob reads as an
/// empty collection; write failures are returned to the caller.
pub struct FlatStorage<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: KeyValueStore> FlatStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<QrCodeRecord>, StorageError> {
        let Some(blob) = self.store.get(RECORDS_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&blob) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Ignoring unreadable record blob '{}': {}", RECORDS_KEY, e);
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, records: &[QrCodeRecord]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(records)?;
        self.store.set(RECORDS_KEY, blob).await?;
        Ok(())
    }

    fn upsert(records: &mut Vec<QrCodeRecord>, record: &QrCodeRecord) {
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
    }
}

#[async_trait]
impl<S: KeyValueStore> StorageProvider for FlatStorage<S> {
    async fn save(&self, record: &QrCodeRecord) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        Self::upsert(&mut records, record);
        self.persist(&records).await
    }

    async fn get(&self, id: &str) -> Result<Option<QrCodeRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    async fn list(&self, options: &ListOptions) -> Result<Vec<QrCodeRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(query::apply(self.load().await?, options))
    }

    async fn update(&self, id: &str, patch: RecordPatch) -> Result<QrCodeRecord, StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        record.apply(patch, chrono::Utc::now().timestamp_millis());
        let updated = record.clone();
        self.persist(&records).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() != before {
            self.persist(&records).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.persist(&[]).await
    }

    async fn import(&self, incoming: &[QrCodeRecord]) -> Result<usize, StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        for record in incoming {
            Self::upsert(&mut records, record);
        }
        self.persist(&records).await?;
        Ok(incoming.len())
    }
}
