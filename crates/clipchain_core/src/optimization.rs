//! Prompt optimization results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a caller-supplied system prompt combines with the style guide.
///
/// # Examples
///
/// ```
/// use clipchain_core::SystemPromptMode;
/// use std::str::FromStr;
///
/// assert_eq!(SystemPromptMode::from_str("append").unwrap(), SystemPromptMode::Append);
/// assert_eq!(SystemPromptMode::default(), SystemPromptMode::Default);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SystemPromptMode {
    /// Style guide alone
    #[default]
    Default,
    /// Custom text alone
    Replace,
    /// Style guide, a blank line, then custom text
    Append,
}

/// One optimized prompt.
///
/// Serialized with camelCase keys; `error` is omitted when absent so that
/// stored history round-trips unchanged.
///
/// # Examples
///
/// ```
/// use clipchain_core::OptimizationResult;
///
/// let failed = OptimizationResult::failed("a castle", "knight", "timeout");
/// assert_eq!(failed.optimized, failed.original);
/// assert_eq!(failed.error.as_deref(), Some("timeout"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Prompt as submitted
    pub original: String,
    /// Prompt as rewritten by the model
    pub optimized: String,
    /// Character the prompt features; empty when none
    pub character: String,
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
    /// Failure message when the original was kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptimizationResult {
    /// A successful result stamped now.
    pub fn new(
        original: impl Into<String>,
        optimized: impl Into<String>,
        character: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            optimized: optimized.into(),
            character: character.into(),
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// A failed result that carries the original text forward.
    pub fn failed(
        original: impl Into<String>,
        character: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let original = original.into();
        Self {
            optimized: original.clone(),
            original,
            character: character.into(),
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }

    /// Whether the model call succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Advisory text about a prompt; the prompt itself is not changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    /// Prompt that was analysed
    pub prompt: String,
    /// Model's suggestions
    pub suggestions: String,
    /// When the suggestions were produced
    pub timestamp: DateTime<Utc>,
}

impl Suggestions {
    /// Suggestions stamped now.
    pub fn new(prompt: impl Into<String>, suggestions: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            suggestions: suggestions.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_omitted_when_absent() {
        let ok = OptimizationResult::new("a", "b", "c");
        let json = serde_json::to_value(&ok).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn mode_parses_lowercase_json() {
        let mode: SystemPromptMode = serde_json::from_str("\"replace\"").unwrap();
        assert_eq!(mode, SystemPromptMode::Replace);
        assert_eq!(SystemPromptMode::Append.to_string(), "append");
    }
}
