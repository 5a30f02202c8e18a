//! Media source types for image input.

use serde::{Deserialize, Serialize};

/// Where image content is sourced from.
///
/// # Examples
///
/// ```
/// use clipchain_core::MediaSource;
///
/// let url = MediaSource::Url("https://example.com/image.png".to_string());
/// let data = MediaSource::Url("data:image/png;base64,iVBORw0KGgo=".to_string());
/// let binary = MediaSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]);
/// assert!(url.is_remote());
/// assert!(!data.is_remote());
/// assert!(!binary.is_remote());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from, including `data:` URLs
    Url(String),
    /// Base64-encoded content without a `data:` prefix
    Base64(String),
    /// Raw binary data
    Binary(Vec<u8>),
}

impl MediaSource {
    /// True for `http(s)` URLs.
    pub fn is_remote(&self) -> bool {
        match self {
            Self::Url(url) => url.starts_with("http://") || url.starts_with("https://"),
            _ => false,
        }
    }
}

impl From<String> for MediaSource {
    /// Browser uploads arrive as `data:` URLs; anything else is treated as a URL too.
    fn from(value: String) -> Self {
        Self::Url(value)
    }
}
