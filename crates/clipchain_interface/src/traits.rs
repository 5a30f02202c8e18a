//! Trait definitions for the remote services the pipeline drives.

use crate::{GeneratedVideo, VideoRequest};
use async_trait::async_trait;
use clipchain_core::{GenerateRequest, GenerateResponse};
use clipchain_error::ClipchainResult;
use std::path::Path;

/// A text-completion service.
///
/// Implementations send the request's messages and return the reply text.
/// Transport and status failures are returned as errors; callers decide
/// whether to recover.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate a reply for the given messages.
    async fn generate(&self, req: &GenerateRequest) -> ClipchainResult<GenerateResponse>;

    /// Provider name (e.g., "openai", "openrouter").
    fn provider_name(&self) -> &'static str;

    /// Model used when the request does not name one.
    fn model_name(&self) -> &str;
}

/// A video-generation service.
///
/// `generate` blocks (asynchronously) until the clip is ready and returns
/// where it can be fetched; `download` materializes it locally.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Submit a prompt and wait for the finished clip.
    async fn generate(&self, req: &VideoRequest) -> ClipchainResult<GeneratedVideo>;

    /// Write the clip at `url` to `dest`, returning the number of bytes written.
    async fn download(&self, url: &str, dest: &Path) -> ClipchainResult<u64>;

    /// Provider name (e.g., "fal").
    fn provider_name(&self) -> &'static str;
}
