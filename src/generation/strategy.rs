use async_trait::async_trait;
use serde::Serialize;

use crate::models::generation::{GenerationRequest, GenerationResult};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StrategyDescriptor {
    pub name: String,
    pub priority: i32,
}

/// One backend able to turn canonical content into a QR image.
///
/// Lower `priority` is tried first. `generate` must not fail loudly: internal
/// problems are reported through a failed [`GenerationResult`].
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> i32;

    /// May acquire an external resource on first call; the outcome is memoized
    /// per instance.
    async fn is_available(&self) -> bool;

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult;

    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            name: self.name().to_string(),
            priority: self.priority(),
        }
    }
}
