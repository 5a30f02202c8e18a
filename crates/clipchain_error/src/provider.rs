//! Errors raised by remote model providers (chat completions, video queues).

/// Specific provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Credential environment variable is unset or empty
    #[display("API key not configured: set {}", _0)]
    MissingApiKey(String),
    /// Transport-level failure before a response was received
    #[display("Request failed: {}", _0)]
    Http(String),
    /// Non-success HTTP status
    #[display("API error (HTTP {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },
    /// The provider rejected the request parameters
    #[display("Request rejected (HTTP {}): {}", status, details.join("; "))]
    Validation {
        /// HTTP status code
        status: u16,
        /// One entry per rejected field, formatted as `field: message`
        details: Vec<String>,
    },
    /// Response body could not be parsed
    #[display("Failed to parse response: {}", _0)]
    ResponseParse(String),
    /// Response contained no usable content
    #[display("Empty response from provider")]
    EmptyResponse,
    /// A queued job reported failure
    #[display("Job failed: {}", _0)]
    JobFailed(String),
    /// A queued job did not finish in time
    #[display("Job did not complete within {} seconds", _0)]
    Timeout(u64),
    /// A completed job returned no result location
    #[display("Job completed without a result URL")]
    MissingResult,
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use clipchain_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Api {
///     status: 401,
///     message: "Unauthorized".to_string(),
/// });
/// assert!(format!("{}", err).contains("401"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// Error kind
    pub kind: ProviderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with caller location.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<ProviderErrorKind> for ProviderError {
    #[track_caller]
    fn from(kind: ProviderErrorKind) -> Self {
        Self::new(kind)
    }
}
