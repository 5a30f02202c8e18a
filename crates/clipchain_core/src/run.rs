//! Pipeline run identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for one pipeline run.
///
/// Temporary clips live under a directory named after the run, so
/// concurrent runs never share file names.
///
/// # Examples
///
/// ```
/// use clipchain_core::RunId;
///
/// let a = RunId::new();
/// let b = RunId::new();
/// assert_ne!(a, b);
/// assert_eq!(a.to_string().len(), 36);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// First eight hex digits, for compact file names.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RunId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}
