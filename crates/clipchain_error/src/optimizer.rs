//! Prompt optimizer error types.

/// Specific optimizer error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OptimizerErrorKind {
    /// No prompt text was supplied
    #[display("Prompt is required")]
    EmptyPrompt,
    /// An image request arrived without image data
    #[display("Image data is required")]
    MissingImage,
    /// The requested model cannot accept images
    #[display("Model {} does not support image input", _0)]
    VisionUnsupported(String),
    /// The style guide could not be read
    #[display("Failed to load style guide: {}", _0)]
    StyleGuide(String),
}

/// Optimizer error with location tracking.
///
/// # Examples
///
/// ```
/// use clipchain_error::{OptimizerError, OptimizerErrorKind};
///
/// let err = OptimizerError::new(OptimizerErrorKind::VisionUnsupported(
///     "meta-llama/llama-3.1-70b-instruct".to_string(),
/// ));
/// assert!(format!("{}", err).contains("does not support image input"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Optimizer Error: {} at line {} in {}", kind, line, file)]
pub struct OptimizerError {
    /// Error kind
    pub kind: OptimizerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl OptimizerError {
    /// Create a new optimizer error with caller location.
    #[track_caller]
    pub fn new(kind: OptimizerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
