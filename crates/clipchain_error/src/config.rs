//! Configuration error types.

/// Specific configuration error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The layered sources could not be merged
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// The merged sources did not match the settings schema
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// The character preset table was malformed
    #[display("Invalid character presets: {}", _0)]
    Presets(String),
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use clipchain_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Parse("server.port: invalid digit".into()));
/// assert!(format!("{}", err).contains("server.port"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// Error kind
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
