//! QR image generation over interchangeable backends.

pub mod engine;
pub mod error;
pub mod render;
pub mod strategies;
pub mod strategy;

pub use engine::GenerationEngine;
pub use strategy::{GenerationStrategy, StrategyDescriptor};
