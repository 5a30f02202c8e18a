//! Trait definitions for the clipchain story-video pipeline.
//!
//! The pipeline stages depend on these traits rather than on concrete
//! HTTP clients, so tests can substitute scripted mocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{TextDriver, VideoBackend};
pub use types::{GeneratedVideo, VideoRequest, VideoRequestBuilder};
