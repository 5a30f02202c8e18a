//! Message content parts.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// A single content part of a chat message.
///
/// # Examples
///
/// ```
/// use clipchain_core::{Input, MediaSource};
///
/// let text = Input::Text("Describe this frame".to_string());
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Url("https://example.com/frame.png".to_string()),
/// };
/// assert!(!text.is_image());
/// assert!(image.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, GIF).
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (URL, base64, or raw bytes)
        source: MediaSource,
    },
}

impl Input {
    /// Whether this part carries an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}
