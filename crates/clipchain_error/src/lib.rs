//! Error types for the clipchain story-video pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use clipchain_error::{ClipchainResult, ProviderError, ProviderErrorKind};
//!
//! fn fetch_data() -> ClipchainResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::MissingApiKey("API_KEY".to_string())))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod encoder;
mod error;
mod optimizer;
mod provider;
mod script;
mod storage;
mod video;

pub use config::{ConfigError, ConfigErrorKind};
pub use encoder::{EncoderError, EncoderErrorKind};
pub use error::{ClipchainError, ClipchainErrorKind, ClipchainResult};
pub use optimizer::{OptimizerError, OptimizerErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use script::{ScriptError, ScriptErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use video::{VideoError, VideoErrorKind};
