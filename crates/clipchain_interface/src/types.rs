//! Request and response types for video backends.

use serde::{Deserialize, Serialize};

/// Parameters for one clip.
///
/// # Examples
///
/// ```
/// use clipchain_interface::VideoRequest;
///
/// let req = VideoRequest::builder()
///     .prompt("A wizard opens a laptop")
///     .aspect_ratio("16:9")
///     .build()
///     .unwrap();
/// assert_eq!(req.aspect_ratio(), "16:9");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct VideoRequest {
    /// Scene text sent as the generation prompt
    prompt: String,
    /// Output aspect ratio, e.g. `16:9`
    #[builder(default = "\"16:9\".to_string()")]
    aspect_ratio: String,
}

impl VideoRequest {
    /// Create a builder.
    pub fn builder() -> VideoRequestBuilder {
        VideoRequestBuilder::default()
    }
}

/// A finished clip on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeneratedVideo {
    /// Download location
    url: String,
    /// Provider job id, when one exists
    request_id: Option<String>,
}

impl GeneratedVideo {
    /// Describe a finished clip.
    pub fn new(url: impl Into<String>, request_id: Option<String>) -> Self {
        Self {
            url: url.into(),
            request_id,
        }
    }
}
