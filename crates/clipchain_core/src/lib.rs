//! Core data types for the clipchain story-video pipeline.
//!
//! This crate provides the plain data shared by every stage: chat messages
//! sent to text models, scene scripts, character presets, optimization
//! results, the model catalogue, pricing, and pipeline progress events.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod event;
mod input;
mod media;
mod message;
mod model;
mod optimization;
mod pricing;
mod request;
mod role;
mod run;
mod scene;

pub use character::{Character, CharacterCatalog, CharacterPreset, normalize_key};
pub use event::PipelineEvent;
pub use input::Input;
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use model::{ModelCatalog, ModelInfo};
pub use optimization::{OptimizationResult, Suggestions, SystemPromptMode};
pub use pricing::{CostEstimate, PricingPolicy};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use run::RunId;
pub use scene::{CLIP_SECONDS, SCENE_COUNT, SceneScripts};
