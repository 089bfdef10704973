use std::sync::Arc;

use crate::generation::GenerationEngine;
use crate::storage::StorageProvider;

/// Shared by every worker. Built once in `main`.
pub struct AppState {
    pub engine: GenerationEngine,
    pub storage: Arc<dyn StorageProvider>,
}
