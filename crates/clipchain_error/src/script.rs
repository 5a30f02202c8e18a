//! Script generation error types.

/// Specific script generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ScriptErrorKind {
    /// No character description was supplied
    #[display("Character description is required")]
    EmptyCharacter,
    /// No story prompt was supplied
    #[display("Story prompt is required")]
    EmptyPrompt,
    /// The model reply held no JSON array
    #[display("No JSON array found in model reply: {}", _0)]
    NoJsonArray(String),
    /// The model reply held a JSON array that is not a list of strings
    #[display("Model reply is not a list of scene descriptions: {}", _0)]
    MalformedArray(String),
    /// The model returned the wrong number of scenes
    #[display("Expected {} scenes, model returned {}", expected, actual)]
    WrongSceneCount {
        /// Scenes required
        expected: usize,
        /// Scenes received
        actual: usize,
    },
    /// A scene description was blank
    #[display("Scene {} is empty", _0)]
    EmptyScene(usize),
}

/// Script error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// Error kind
    pub kind: ScriptErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new script error with caller location.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
