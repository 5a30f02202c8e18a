//! Parameters for optimizer calls.

use clipchain_core::{MediaSource, SystemPromptMode};

/// Inputs to [`crate::PromptOptimizer`] operations.
///
/// Unset `model` means the optimizer's default model. Character and context
/// are used by `optimize` only.
///
/// # Examples
///
/// ```
/// use clipchain_core::SystemPromptMode;
/// use clipchain_optimizer::OptimizeRequest;
///
/// let req = OptimizeRequest::new("a knight at dawn")
///     .with_character("knight")
///     .with_model("openai/gpt-4o")
///     .with_custom_system_prompt("Keep it under 50 words.")
///     .with_mode(SystemPromptMode::Append);
/// assert_eq!(req.model.as_deref(), Some("openai/gpt-4o"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct OptimizeRequest {
    /// Prompt to rewrite or analyse
    pub prompt: String,
    /// Character featured in the prompt
    pub character: String,
    /// Extra context, e.g. position in a story
    pub context: String,
    /// Model id
    pub model: Option<String>,
    /// Reference image, used only with vision-capable models
    pub image: Option<MediaSource>,
    /// Caller-supplied system prompt
    pub custom_system_prompt: Option<String>,
    /// How the custom system prompt combines with the style guide
    pub mode: SystemPromptMode,
}

impl OptimizeRequest {
    /// A request for `prompt` with every option unset.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}
