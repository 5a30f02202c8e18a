//! Video generation error types.
//!
//! Every per-scene variant carries the 1-based scene number so that a failed
//! batch names the scene that broke it.

/// Specific video generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum VideoErrorKind {
    /// The batch contained no prompts
    #[display("No scene prompts to generate")]
    EmptyBatch,
    /// The video service refused the request parameters
    #[display("Scene {} rejected by video service: {}", scene, details.join("; "))]
    Validation {
        /// 1-based scene number
        scene: usize,
        /// One entry per rejected field
        details: Vec<String>,
    },
    /// Submitting, polling or fetching the job failed
    #[display("Scene {} generation failed: {}", scene, message)]
    Generation {
        /// 1-based scene number
        scene: usize,
        /// Underlying failure
        message: String,
    },
    /// The finished clip could not be downloaded
    #[display("Scene {} download failed: {}", scene, message)]
    Download {
        /// 1-based scene number
        scene: usize,
        /// Underlying failure
        message: String,
    },
    /// The downloaded clip could not be written
    #[display("Scene {} could not be saved: {}", scene, message)]
    Save {
        /// 1-based scene number
        scene: usize,
        /// Underlying failure
        message: String,
    },
    /// The backend returned a different number of clips than prompts
    #[display("Expected {} clips, generated {}", expected, actual)]
    ClipCountMismatch {
        /// Number of prompts submitted
        expected: usize,
        /// Number of clips returned
        actual: usize,
    },
}

impl VideoErrorKind {
    /// The scene number this error refers to, if any.
    pub fn scene(&self) -> Option<usize> {
        match self {
            Self::EmptyBatch | Self::ClipCountMismatch { .. } => None,
            Self::Validation { scene, .. }
            | Self::Generation { scene, .. }
            | Self::Download { scene, .. }
            | Self::Save { scene, .. } => Some(*scene),
        }
    }
}

/// Video generation error with location tracking.
///
/// # Examples
///
/// ```
/// use clipchain_error::{VideoError, VideoErrorKind};
///
/// let err = VideoError::new(VideoErrorKind::Validation {
///     scene: 2,
///     details: vec!["prompt: too long".to_string()],
/// });
/// assert_eq!(err.kind.scene(), Some(2));
/// assert!(format!("{}", err).contains("prompt: too long"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Video Error: {} at line {} in {}", kind, line, file)]
pub struct VideoError {
    /// Error kind
    pub kind: VideoErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl VideoError {
    /// Create a new video error with caller location.
    #[track_caller]
    pub fn new(kind: VideoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
