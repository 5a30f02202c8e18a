//! Request and response types for text generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Generic chat-completion request.
///
/// # Examples
///
/// ```
/// use clipchain_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::system("Be brief."), Message::user("Hello!")])
///     .max_tokens(Some(100))
///     .temperature(Some(0.7))
///     .model(Some("gpt-4".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier to use; drivers fall back to their default when unset
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Create a builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// The text of the first system message, if any.
    pub fn system_text(&self) -> Option<String> {
        self.messages
            .iter()
            .find(|m| m.role == crate::Role::System)
            .map(Message::text)
    }
}

/// The reply to a [`GenerateRequest`].
///
/// # Examples
///
/// ```
/// use clipchain_core::GenerateResponse;
///
/// let response = GenerateResponse::new("Hello! How can I help?");
/// assert_eq!(response.text, "Hello! How can I help?");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
    /// Model that produced the reply, when reported by the provider
    pub model: Option<String>,
}

impl GenerateResponse {
    /// A response holding only text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }
}
