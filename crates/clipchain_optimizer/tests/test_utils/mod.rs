//! Shared helpers for optimizer tests.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockReply};

use clipchain_core::ModelCatalog;
use clipchain_optimizer::{PromptOptimizer, StyleGuide};
use std::sync::Arc;
use std::time::Duration;

pub const GUIDE: &str = "Describe subject, context, action, style, camera, ambiance and audio.";
pub const VISION_MODEL: &str = "openai/gpt-4o";
pub const TEXT_MODEL: &str = "anthropic/claude-3-haiku";

/// Optimizer over `driver` with an in-memory guide and no batch delay.
#[allow(dead_code)]
pub fn optimizer(driver: Arc<MockDriver>) -> PromptOptimizer {
    PromptOptimizer::new(
        driver,
        StyleGuide::from_text(GUIDE),
        ModelCatalog::openrouter(),
        VISION_MODEL,
    )
    .with_batch_delay(Duration::ZERO)
}
