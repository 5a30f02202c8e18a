//! Encoder (ffmpeg/ffprobe) error types.

/// Specific encoder error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EncoderErrorKind {
    /// Concatenation was requested with no input clips
    #[display("No input clips to concatenate")]
    NoInputs,
    /// An input clip does not exist
    #[display("Input clip not found: {}", _0)]
    InputMissing(String),
    /// The encoder binary could not be started
    #[display("Could not run {}: {}", program, message)]
    NotFound {
        /// Binary that failed to start
        program: String,
        /// OS error text
        message: String,
    },
    /// The encoder exited unsuccessfully
    #[display("Video concatenation failed: {}", stderr)]
    Failed {
        /// Exit code, when the process was not killed by a signal
        code: Option<i32>,
        /// Encoder stderr, verbatim
        stderr: String,
    },
    /// The probe tool exited unsuccessfully
    #[display("Probe failed: {}", _0)]
    ProbeFailed(String),
    /// The probe output could not be parsed
    #[display("Failed to parse probe output: {}", _0)]
    ProbeParse(String),
}

/// Encoder error with location tracking.
///
/// # Examples
///
/// ```
/// use clipchain_error::{EncoderError, EncoderErrorKind};
///
/// let err = EncoderError::new(EncoderErrorKind::Failed {
///     code: Some(1),
///     stderr: "Invalid data found when processing input".to_string(),
/// });
/// assert!(format!("{}", err).contains("Invalid data found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Encoder Error: {} at line {} in {}", kind, line, file)]
pub struct EncoderError {
    /// Error kind
    pub kind: EncoderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl EncoderError {
    /// Create a new encoder error with caller location.
    #[track_caller]
    pub fn new(kind: EncoderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
