//! Recent optimization results and saved prompts.

use clipchain_core::OptimizationResult;
use clipchain_error::{ClipchainResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Maximum entries kept by [`OptimizationHistory::default`].
pub const HISTORY_CAPACITY: usize = 20;

/// Most-recent-first list of results, capped in size.
///
/// Adding to a full history evicts the oldest entry. The JSON form is a
/// plain array, newest first.
///
/// # Examples
///
/// ```
/// use clipchain_core::OptimizationResult;
/// use clipchain_optimizer::OptimizationHistory;
///
/// let mut history = OptimizationHistory::with_capacity(2);
/// history.push(OptimizationResult::new("a", "A", ""));
/// history.push(OptimizationResult::new("b", "B", ""));
/// history.push(OptimizationResult::new("c", "C", ""));
/// let originals: Vec<_> = history.iter().map(|r| r.original.as_str()).collect();
/// assert_eq!(originals, ["c", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationHistory {
    entries: VecDeque<OptimizationResult>,
    capacity: usize,
}

impl Default for OptimizationHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl OptimizationHistory {
    /// An empty history holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a result as the newest entry.
    pub fn push(&mut self, result: OptimizationResult) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &OptimizationResult> {
        self.entries.iter()
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&OptimizationResult> {
        self.entries.front()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize as a JSON array, newest first.
    pub fn to_json(&self) -> ClipchainResult<String> {
        serde_json::to_string(&self.entries).map_err(|e| serialization_error(e).into())
    }

    /// Restore from a JSON array, keeping at most [`HISTORY_CAPACITY`] entries.
    pub fn from_json(json: &str) -> ClipchainResult<Self> {
        let entries: VecDeque<OptimizationResult> =
            serde_json::from_str(json).map_err(serialization_error)?;
        let mut history = Self::default();
        history.entries = entries;
        history.entries.truncate(history.capacity);
        Ok(history)
    }
}

impl Extend<OptimizationResult> for OptimizationHistory {
    fn extend<I: IntoIterator<Item = OptimizationResult>>(&mut self, iter: I) {
        for result in iter {
            self.push(result);
        }
    }
}

/// Named prompts saved for reuse.
///
/// # Examples
///
/// ```
/// use clipchain_optimizer::PromptLibrary;
///
/// let mut library = PromptLibrary::default();
/// library.save("noir", "Shot in high-contrast black and white.");
/// assert_eq!(library.get("noir"), Some("Shot in high-contrast black and white."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptLibrary {
    prompts: BTreeMap<String, String>,
}

impl PromptLibrary {
    /// Store a prompt, replacing any prompt with the same name.
    pub fn save(&mut self, name: impl Into<String>, prompt: impl Into<String>) -> Option<String> {
        self.prompts.insert(name.into(), prompt.into())
    }

    /// Look up a prompt by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.prompts.get(name).map(String::as_str)
    }

    /// Delete a prompt.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.prompts.remove(name)
    }

    /// Prompt names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(String::as_str)
    }

    /// Number of saved prompts.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// True when nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Serialize as a JSON object.
    pub fn to_json(&self) -> ClipchainResult<String> {
        serde_json::to_string(self).map_err(|e| serialization_error(e).into())
    }

    /// Restore from a JSON object.
    pub fn from_json(json: &str) -> ClipchainResult<Self> {
        Ok(serde_json::from_str(json).map_err(serialization_error)?)
    }
}

#[track_caller]
fn serialization_error(e: serde_json::Error) -> StorageError {
    StorageError::new(StorageErrorKind::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_twenty() {
        let mut history = OptimizationHistory::default();
        history.extend((0..25).map(|i| OptimizationResult::new(i.to_string(), "x", "")));
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().original, "24");
        assert_eq!(history.iter().last().unwrap().original, "5");
    }

    #[test]
    fn history_round_trips_with_errors() {
        let mut history = OptimizationHistory::default();
        history.push(OptimizationResult::failed("p", "wizard", "boom"));
        history.push(OptimizationResult::new("q", "Q", ""));
        let restored = OptimizationHistory::from_json(&history.to_json().unwrap()).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn oversized_json_is_truncated() {
        let entries: Vec<_> = (0..30)
            .map(|i| OptimizationResult::new(i.to_string(), "x", ""))
            .collect();
        let json = serde_json::to_string(&entries).unwrap();
        let history = OptimizationHistory::from_json(&json).unwrap();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest().unwrap().original, "0");
    }

    #[test]
    fn library_serializes_as_object() {
        let mut library = PromptLibrary::default();
        library.save("b", "two");
        library.save("a", "one");
        assert_eq!(library.to_json().unwrap(), r#"{"a":"one","b":"two"}"#);
        assert_eq!(library.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(PromptLibrary::from_json(r#"{"a":"one","b":"two"}"#).unwrap(), library);
    }

    #[test]
    fn malformed_history_is_storage_error() {
        let err = OptimizationHistory::from_json("[{\"original\": 3}").unwrap_err();
        assert!(matches!(
            err.kind(),
            clipchain_error::ClipchainErrorKind::Storage(StorageError {
                kind: StorageErrorKind::Serialization(_),
                ..
            })
        ));
    }
}
