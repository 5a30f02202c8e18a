//! Top-level error wrapper types.

use crate::{
    ConfigError, EncoderError, EncoderErrorKind, OptimizerError, OptimizerErrorKind,
    ProviderError, ScriptError, ScriptErrorKind, StorageError, VideoError, VideoErrorKind,
};

/// Every error condition the pipeline can produce.
///
/// # Examples
///
/// ```
/// use clipchain_error::{ClipchainError, ProviderError, ProviderErrorKind};
///
/// let provider_err = ProviderError::new(ProviderErrorKind::Timeout(300));
/// let err: ClipchainError = provider_err.into();
/// assert!(format!("{}", err).contains("Provider Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ClipchainErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Filesystem error
    #[from(StorageError)]
    Storage(StorageError),
    /// Remote model provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Script generation error
    #[from(ScriptError)]
    Script(ScriptError),
    /// Prompt optimizer error
    #[from(OptimizerError)]
    Optimizer(OptimizerError),
    /// Video generation error
    #[from(VideoError)]
    Video(VideoError),
    /// Encoder error
    #[from(EncoderError)]
    Encoder(EncoderError),
}

/// Clipchain error with kind discrimination.
///
/// # Examples
///
/// ```
/// use clipchain_error::{ClipchainResult, ConfigError, ConfigErrorKind};
///
/// fn might_fail() -> ClipchainResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Parse("missing field".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Clipchain Error: {}", _0)]
pub struct ClipchainError(Box<ClipchainErrorKind>);

impl ClipchainError {
    /// Create a new error from a kind.
    pub fn new(kind: ClipchainErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ClipchainErrorKind {
        &self.0
    }

    /// The error message without source location, suitable for end users.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipchain_error::{ClipchainError, ScriptError, ScriptErrorKind};
    ///
    /// let err: ClipchainError = ScriptError::new(ScriptErrorKind::EmptyPrompt).into();
    /// assert_eq!(err.detail(), "Story prompt is required");
    /// ```
    pub fn detail(&self) -> String {
        match self.kind() {
            ClipchainErrorKind::Config(e) => e.kind.to_string(),
            ClipchainErrorKind::Storage(e) => e.kind.to_string(),
            ClipchainErrorKind::Provider(e) => e.kind.to_string(),
            ClipchainErrorKind::Script(e) => e.kind.to_string(),
            ClipchainErrorKind::Optimizer(e) => e.kind.to_string(),
            ClipchainErrorKind::Video(e) => e.kind.to_string(),
            ClipchainErrorKind::Encoder(e) => e.kind.to_string(),
        }
    }

    /// Whether the error was caused by invalid caller input rather than a
    /// downstream failure.
    pub fn is_validation(&self) -> bool {
        match self.kind() {
            ClipchainErrorKind::Script(e) => matches!(
                e.kind,
                ScriptErrorKind::EmptyCharacter | ScriptErrorKind::EmptyPrompt
            ),
            ClipchainErrorKind::Optimizer(e) => {
                !matches!(e.kind, OptimizerErrorKind::StyleGuide(_))
            }
            ClipchainErrorKind::Video(e) => matches!(e.kind, VideoErrorKind::EmptyBatch),
            ClipchainErrorKind::Encoder(e) => matches!(e.kind, EncoderErrorKind::NoInputs),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to ClipchainErrorKind
impl<T> From<T> for ClipchainError
where
    T: Into<ClipchainErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for clipchain operations.
pub type ClipchainResult<T> = std::result::Result<T, ClipchainError>;
