//! OpenAI-compatible chat completions.

mod client;
mod dto;

pub use client::{ChatCompletionClient, image_url};
pub use dto::{
    ChatChoice, ChatContent, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse,
    ChatResponseMessage, ContentPart, ImageUrl,
};
