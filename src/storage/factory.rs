use log::{info, warn};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::mongodb::get_database;
use crate::state::environment::Environment;
use crate::storage::flat::{FileKeyValueStore, FlatStorage, MemoryKeyValueStore};
use crate::storage::mongo::MongoStorage;
use crate::storage::{StorageError, StorageProvider};

/// `STORAGE_DIR` value selecting a process-local flat store.
pub const IN_MEMORY: &str = ":memory:";

/// Picks the persistence backend once at startup. Callers only ever see the
/// `StorageProvider` contract.
pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &AppConfig, environment: &Environment) -> Arc<dyn StorageProvider> {
        if environment.structured_store_available {
            match Self::probe_structured(config).await {
                Ok(storage) => {
                    info!("Using MongoDB record storage");
                    return Arc::new(storage);
                }
                Err(e) => warn!("MongoDB storage unavailable, falling back: {}", e),
            }
        }
        Self::flat(config)
    }

    /// A structured store is usable once a trivial read succeeds.
    async fn probe_structured(config: &AppConfig) -> Result<MongoStorage, StorageError> {
        let uri = config.mongodb_uri.as_deref().unwrap_or_default();
        let db = get_database(uri, &config.mongodb_db, config.mongodb_timeout).await?;
        let storage = MongoStorage::new(&db);
        storage.get_stats().await?;
        storage.ensure_indexes().await?;
        Ok(storage)
    }

    fn flat(config: &AppConfig) -> Arc<dyn StorageProvider> {
        if config.storage_dir == IN_MEMORY {
            info!("Using in-memory record storage");
            return Arc::new(FlatStorage::new(MemoryKeyValueStore::default()));
        }
        info!("Using file record storage in {}", config.storage_dir);
        Arc::new(FlatStorage::new(FileKeyValueStore::new(&config.storage_dir)))
    }
}
