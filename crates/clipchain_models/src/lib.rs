//! Provider clients for clipchain.
//!
//! - [`ChatCompletionClient`] speaks the OpenAI chat-completions format and
//!   serves both script generation (OpenAI) and prompt optimization
//!   (OpenRouter).
//! - [`FalVideoClient`] drives the fal.ai request queue for text-to-video.
//!
//! Both read their API keys from environment variables named in
//! configuration; a missing key surfaces as an error on first use.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod env;
mod fal;
mod metrics;
mod openai_compat;

pub use env::non_empty_env;
pub use fal::{
    FalFile, FalQueueStatus, FalQueueSubmission, FalSubmitRequest, FalVideoClient,
    FalVideoResult, parse_validation_details,
};
pub use metrics::{METER_NAME, ProviderMetrics, classify_status};
pub use openai_compat::{
    ChatChoice, ChatCompletionClient, ChatContent, ChatMessage, ChatRequest, ChatRequestBuilder,
    ChatResponse, ChatResponseMessage, ContentPart, ImageUrl, image_url,
};
