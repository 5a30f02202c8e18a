//! clipchain: character + story prompt in, narrated three-scene video out.
//!
//! The stages live in their own crates and are re-exported here:
//! script generation, prompt optimization, clip generation and assembly.
//! This crate adds layered configuration, the [`Pipeline`] that runs the
//! stages in order, and the HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use clipchain::{ClipchainConfig, Pipeline, StoryRequest};
//!
//! # async fn run() -> clipchain::ClipchainResult<()> {
//! let config = ClipchainConfig::load()?;
//! let pipeline = Pipeline::from_config(&config)?;
//! let output = pipeline
//!     .run(&StoryRequest::new("wizard", "discovers modern technology"), None)
//!     .await?;
//! println!("{}", output.output.display());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod logging;
#[cfg(feature = "observability")]
mod observability;
mod pipeline;

pub use api::{ApiError, ApiState, create_router};
pub use config::{
    ClipchainConfig, DEFAULT_CONFIG, ENV_PREFIX, OptimizerConfig, PathsConfig, PipelineConfig,
    ScriptsConfig, ServerConfig, VideoConfig,
};
pub use logging::{LogConfig, init_logging, shutdown_logging};
pub use pipeline::{Pipeline, StoryOutput, StoryRequest};

pub use clipchain_core::*;
pub use clipchain_error::*;
pub use clipchain_interface::*;
pub use clipchain_models::{ChatCompletionClient, FalVideoClient};
pub use clipchain_optimizer::{
    OptimizationHistory, OptimizeRequest, PromptLibrary, PromptOptimizer, StyleGuide,
};
pub use clipchain_script::{ScriptDraft, ScriptGenerator, ScriptSource};
pub use clipchain_video::{
    Concatenator, EncoderSettings, EventSender, VideoGenerator, VideoInfo, cleanup, probe,
    validate_files,
};
