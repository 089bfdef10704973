use futures_util::FutureExt;
use log::{debug, info, warn};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use crate::generation::strategies;
use crate::generation::strategy::{GenerationStrategy, StrategyDescriptor};
use crate::models::generation::{GenerationRequest, GenerationResult};
use crate::state::environment::Environment;

pub const CONTENT_REQUIRED: &str = "Content is required";
pub const SIZE_REQUIRED: &str = "Size must be greater than 0";
pub const ALL_STRATEGIES_FAILED: &str = "All generation strategies failed";

/// Runs strategies in priority order and remembers the last one that worked.
///
/// The remembered name is only a hint: concurrent calls may overwrite each
/// other's value and the last writer wins.
pub struct GenerationEngine {
    strategies: Vec<Arc<dyn GenerationStrategy>>,
    last_success: Mutex<Option<String>>,
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationEngine {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            last_success: Mutex::new(None),
        }
    }

    /// Engine with the built-in local and remote strategies.
    pub fn with_default_strategies(environment: Environment) -> Self {
        let mut engine = Self::new();
        for strategy in strategies::defaults(environment) {
            engine.register(strategy);
        }
        engine
    }

    /// Add a strategy and re-sort by priority. Equal priorities keep registration
    /// order; a strategy with an already registered name replaces the old one.
    pub fn register(&mut self, strategy: Arc<dyn GenerationStrategy>) {
        if let Some(index) = self
            .strategies
            .iter()
            .position(|s| s.name() == strategy.name())
        {
            warn!("Replacing generation strategy '{}'", strategy.name());
            self.strategies.remove(index);
        }
        self.strategies.push(strategy);
        self.strategies.sort_by_key(|s| s.priority());
    }

    pub fn strategies(&self) -> Vec<StrategyDescriptor> {
        self.strategies.iter().map(|s| s.descriptor()).collect()
    }

    pub fn last_successful_strategy(&self) -> Option<String> {
        self.last_success
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn remember(&self, name: &str) {
        let mut last = self
            .last_success
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if last.as_deref() != Some(name) {
            info!("Generation strategy '{}' is now preferred", name);
            *last = Some(name.to_string());
        }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        if request.content.trim().is_empty() {
            return GenerationResult::failure(CONTENT_REQUIRED);
        }
        if request.size == 0 {
            return GenerationResult::failure(SIZE_REQUIRED);
        }

        if let Some(name) = self.last_successful_strategy() {
            if let Some(strategy) = self.strategies.iter().find(|s| s.name() == name) {
                if let Some(result) = Self::attempt(strategy.as_ref(), request).await {
                    return result;
                }
                debug!("Preferred strategy '{}' did not succeed, scanning", name);
            }
        }

        for strategy in &self.strategies {
            if let Some(result) = Self::attempt(strategy.as_ref(), request).await {
                self.remember(strategy.name());
                return result;
            }
        }

        warn!(
            "All {} generation strategies failed for {} content",
            self.strategies.len(),
            request.content_type
        );
        GenerationResult::failure(ALL_STRATEGIES_FAILED)
    }

    /// Probe then run one strategy. Unavailability, failure results and panics
    /// all come back as `None`.
    async fn attempt(
        strategy: &dyn GenerationStrategy,
        request: &GenerationRequest,
    ) -> Option<GenerationResult> {
        let name = strategy.name();

        match AssertUnwindSafe(strategy.is_available()).catch_unwind().await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Strategy '{}' unavailable", name);
                return None;
            }
            Err(_) => {
                warn!("Strategy '{}' panicked while probing availability", name);
                return None;
            }
        }

        match AssertUnwindSafe(strategy.generate(request)).catch_unwind().await {
            Ok(mut result) if result.is_usable() => {
                result.error = None;
                result.strategy_name.get_or_insert_with(|| name.to_string());
                result.metadata.get_or_insert_with(|| request.metadata());
                debug!("Strategy '{}' succeeded", name);
                Some(result)
            }
            Ok(result) => {
                debug!(
                    "Strategy '{}' failed: {}",
                    name,
                    result.error.as_deref().unwrap_or("no image produced")
                );
                None
            }
            Err(_) => {
                warn!("Strategy '{}' panicked while generating", name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use crate::models::content::ContentType;

    struct FakeStrategy {
        name: &'static str,
        priority: i32,
        available: AtomicBool,
        succeeds: AtomicBool,
        panics: bool,
        probes: AtomicUsize,
        calls: AtomicUsize,
    }

    impl FakeStrategy {
        fn new(name: &'static str, priority: i32, available: bool, succeeds: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                priority,
                available: AtomicBool::new(available),
                succeeds: AtomicBool::new(succeeds),
                panics: false,
                probes: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
            })
        }

        fn panicking(name: &'static str, priority: i32) -> Arc<Self> {
            Arc::new(Self {
                panics: true,
                ..Arc::into_inner(Self::new(name, priority, true, true)).unwrap()
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationStrategy for FakeStrategy {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        async fn is_available(&self) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.available.load(Ordering::SeqCst)
        }

        async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.panics {
                panic!("renderer exploded");
            }
            if self.succeeds.load(Ordering::SeqCst) {
                GenerationResult::success(self.name, format!("data:{}", self.name), None, request)
            } else {
                GenerationResult::strategy_failure(self.name, "boom")
            }
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("https://example.com", ContentType::Url)
    }

    #[tokio::test]
    async fn blank_content_never_touches_strategies() {
        let strategy = FakeStrategy::new("a", 1, true, true);
        let mut engine = GenerationEngine::new();
        engine.register(strategy.clone());

        let result = engine
            .generate(&GenerationRequest::new("  ", ContentType::Text))
            .await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(CONTENT_REQUIRED));
        assert_eq!(strategy.probes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_size_never_touches_strategies() {
        let strategy = FakeStrategy::new("a", 1, true, true);
        let mut engine = GenerationEngine::new();
        engine.register(strategy.clone());

        let result = engine.generate(&request().with_size(0)).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(SIZE_REQUIRED));
        assert!(result.metadata.is_none());
        assert_eq!(strategy.probes.load(Ordering::SeqCst), 0);
        assert!(engine.last_successful_strategy().is_none());
    }

    #[tokio::test]
    async fn registration_sorts_by_priority_stably() {
        let mut engine = GenerationEngine::new();
        engine.register(FakeStrategy::new("late", 5, true, true));
        engine.register(FakeStrategy::new("first-tie", 2, true, true));
        engine.register(FakeStrategy::new("early", 1, true, true));
        engine.register(FakeStrategy::new("second-tie", 2, true, true));

        let names: Vec<String> = engine.strategies().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["early", "first-tie", "second-tie", "late"]);
    }

    #[tokio::test]
    async fn duplicate_name_replaces_strategy() {
        let mut engine = GenerationEngine::new();
        engine.register(FakeStrategy::new("a", 1, true, true));
        engine.register(FakeStrategy::new("a", 7, true, true));
        assert_eq!(
            engine.strategies(),
            vec![StrategyDescriptor {
                name: "a".into(),
                priority: 7
            }]
        );
    }

    #[tokio::test]
    async fn first_available_success_wins() {
        let unavailable = FakeStrategy::new("offline", 1, false, true);
        let failing = FakeStrategy::new("broken", 2, true, false);
        let working = FakeStrategy::new("working", 3, true, true);
        let never = FakeStrategy::new("never", 4, true, true);

        let mut engine = GenerationEngine::new();
        for s in [&never, &working, &failing, &unavailable] {
            engine.register(s.clone());
        }

        let result = engine.generate(&request()).await;
        assert!(result.success);
        assert_eq!(result.strategy_name.as_deref(), Some("working"));
        assert_eq!(result.metadata.unwrap().content_length, 19);
        assert_eq!(unavailable.calls(), 0);
        assert_eq!(failing.calls(), 1);
        assert_eq!(never.calls(), 0);
        assert_eq!(engine.last_successful_strategy().as_deref(), Some("working"));
    }

    #[tokio::test]
    async fn exhaustion_returns_failure() {
        let mut engine = GenerationEngine::new();
        engine.register(FakeStrategy::new("a", 1, true, false));
        engine.register(FakeStrategy::new("b", 2, true, false));
        engine.register(FakeStrategy::panicking("c", 3));

        let result = engine.generate(&request()).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(ALL_STRATEGIES_FAILED));
        assert!(result.data_url.is_none());
        assert!(engine.last_successful_strategy().is_none());
    }

    #[tokio::test]
    async fn empty_engine_fails_cleanly() {
        let engine = GenerationEngine::new();
        let result = engine.generate(&request()).await;
        assert_eq!(result.error.as_deref(), Some(ALL_STRATEGIES_FAILED));
    }

    #[tokio::test]
    async fn panicking_strategy_is_skipped() {
        let panicking = FakeStrategy::panicking("panics", 1);
        let fallback = FakeStrategy::new("fallback", 2, true, true);
        let mut engine = GenerationEngine::new();
        engine.register(panicking.clone());
        engine.register(fallback.clone());

        let result = engine.generate(&request()).await;
        assert_eq!(result.strategy_name.as_deref(), Some("fallback"));
        assert_eq!(panicking.calls(), 1);
    }

    #[tokio::test]
    async fn remembered_strategy_is_tried_first() {
        let a = FakeStrategy::new("a", 1, true, false);
        let b = FakeStrategy::new("b", 2, true, true);
        let mut engine = GenerationEngine::new();
        engine.register(a.clone());
        engine.register(b.clone());

        engine.generate(&request()).await;
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);

        // a recovers, but b stays preferred and short-circuits the scan
        a.succeeds.store(true, Ordering::SeqCst);
        let result = engine.generate(&request()).await;
        assert_eq!(result.strategy_name.as_deref(), Some("b"));
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 2);
    }

    #[tokio::test]
    async fn falls_back_to_scan_when_remembered_strategy_fails() {
        let a = FakeStrategy::new("a", 1, true, false);
        let b = FakeStrategy::new("b", 2, true, true);
        let mut engine = GenerationEngine::new();
        engine.register(a.clone());
        engine.register(b.clone());
        engine.generate(&request()).await;

        b.available.store(false, Ordering::SeqCst);
        a.succeeds.store(true, Ordering::SeqCst);
        let result = engine.generate(&request()).await;
        assert_eq!(result.strategy_name.as_deref(), Some("a"));
        assert_eq!(engine.last_successful_strategy().as_deref(), Some("a"));
    }
}
