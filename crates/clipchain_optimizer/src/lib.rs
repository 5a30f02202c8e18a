//! Style-guided prompt optimization.
//!
//! [`PromptOptimizer`] sends prompts to a text model with a style guide
//! as system context. The guide is read once per optimizer and shared by
//! its clones. Callers may replace the guide or append to it per request.
//!
//! Batch optimization tolerates per-item failures: the failed item keeps
//! its original text and carries the error message.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod history;
mod optimizer;
mod request;
mod style_guide;

pub use history::{HISTORY_CAPACITY, OptimizationHistory, PromptLibrary};
pub use optimizer::{DEFAULT_BATCH_DELAY, FROM_IMAGE_ORIGINAL, PromptOptimizer};
pub use request::OptimizeRequest;
pub use style_guide::StyleGuide;
