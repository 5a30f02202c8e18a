//! Message types for chat requests.

use crate::{Input, MediaSource, Role};
use serde::{Deserialize, Serialize};

/// A multimodal chat message.
///
/// # Examples
///
/// ```
/// use clipchain_core::{Message, Role};
///
/// let message = Message::user("Hello!");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.text(), "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The content of the message (can be multimodal)
    pub content: Vec<Input>,
}

impl Message {
    /// Create a builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// A text-only system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: vec![Input::Text(text.into())],
        }
    }

    /// A text-only user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![Input::Text(text.into())],
        }
    }

    /// A user message made of a text part followed by an image part.
    pub fn user_with_image(text: impl Into<String>, image: MediaSource) -> Self {
        Self {
            role: Role::User,
            content: vec![
                Input::Text(text.into()),
                Input::Image {
                    mime: None,
                    source: image,
                },
            ],
        }
    }

    /// Concatenated text of all text parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|input| match input {
                Input::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any part carries an image.
    pub fn has_image(&self) -> bool {
        self.content.iter().any(Input::is_image)
    }
}
