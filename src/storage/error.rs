use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Record not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("BSON encoding error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
