//! Scene scripts: the text that drives one video clip each.

use clipchain_error::{ScriptError, ScriptErrorKind};
use serde::{Deserialize, Serialize};

/// Number of scenes in every story.
pub const SCENE_COUNT: usize = 3;

/// Length of every generated clip, in seconds.
pub const CLIP_SECONDS: u32 = 8;

/// Exactly [`SCENE_COUNT`] non-empty scene descriptions, in story order.
///
/// # Examples
///
/// ```
/// use clipchain_core::SceneScripts;
///
/// let scripts = SceneScripts::new(vec![
///     "The wizard enters".to_string(),
///     "The wizard finds a phone".to_string(),
///     "The wizard takes a selfie".to_string(),
/// ])
/// .unwrap();
/// assert_eq!(scripts.len(), 3);
///
/// assert!(SceneScripts::new(vec!["only one".to_string()]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SceneScripts(Vec<String>);

impl SceneScripts {
    /// Validate and wrap a list of scripts.
    ///
    /// # Errors
    ///
    /// Fails if the list does not hold exactly [`SCENE_COUNT`] entries or
    /// any entry is blank.
    #[track_caller]
    pub fn new(scripts: Vec<String>) -> Result<Self, ScriptError> {
        if scripts.len() != SCENE_COUNT {
            return Err(ScriptError::new(ScriptErrorKind::WrongSceneCount {
                expected: SCENE_COUNT,
                actual: scripts.len(),
            }));
        }
        if let Some(index) = scripts.iter().position(|s| s.trim().is_empty()) {
            return Err(ScriptError::new(ScriptErrorKind::EmptyScene(index + 1)));
        }
        Ok(Self(scripts))
    }

    /// Number of scenes; always [`SCENE_COUNT`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate scripts in story order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Borrow the scripts as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Unwrap into the inner vector.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl TryFrom<Vec<String>> for SceneScripts {
    type Error = ScriptError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SceneScripts> for Vec<String> {
    fn from(value: SceneScripts) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a SceneScripts {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_scene() {
        let err = SceneScripts::new(vec!["a".into(), "  ".into(), "c".into()]).unwrap_err();
        assert_eq!(err.kind, ScriptErrorKind::EmptyScene(2));
    }

    #[test]
    fn deserialize_enforces_count() {
        let ok: Result<SceneScripts, _> = serde_json::from_str(r#"["a","b","c"]"#);
        assert!(ok.is_ok());
        let short: Result<SceneScripts, _> = serde_json::from_str(r#"["a","b"]"#);
        assert!(short.is_err());
    }
}
